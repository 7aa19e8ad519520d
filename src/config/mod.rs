//! Configuration management for the realtime metrics service
//!
//! This module handles loading, validation, and management of all service configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{MetricsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backing store connection
    #[serde(default)]
    pub redis: RedisConfig,
    /// Bucket layout and retention
    #[serde(default)]
    pub realtime_metrics: RealtimeMetricsConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::read_file(path.as_ref()).await?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from file, then apply environment variable overrides
    ///
    /// A variable only wins when it differs from the built-in default.
    pub async fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path.as_ref(), |name| std::env::var(name).ok()).await
    }

    pub(crate) async fn from_file_with<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::read_file(path).await?.merge(Self::load_with(lookup)?);
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MetricsError::config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| MetricsError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self::load_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    ///
    /// A bad bucket layout is reported as [`MetricsError::InvalidConfiguration`],
    /// everything else as [`MetricsError::Config`].
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.realtime_metrics
            .validate()
            .map_err(MetricsError::invalid_configuration)?;

        self.redis
            .validate()
            .map_err(|e| MetricsError::config(format!("Redis config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| MetricsError::config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.redis = self.redis.merge(other.redis);
        self.realtime_metrics = self.realtime_metrics.merge(other.realtime_metrics);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MetricsError::config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| MetricsError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
