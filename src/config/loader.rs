//! Configuration loading from environment variables

use super::Config;
use crate::utils::error::{MetricsError, Result};
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Build a configuration from environment variables on top of the defaults
    pub(super) fn load_env() -> Result<Self> {
        Self::load_with(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub(crate) fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        // Redis configuration
        if let Some(url) = lookup("REDIS_URL") {
            config.redis.url = url;
        }
        if let Some(value) = lookup("REDIS_CONNECTION_TIMEOUT") {
            config.redis.connection_timeout = parse_var("REDIS_CONNECTION_TIMEOUT", &value)?;
        }

        // Bucket layout
        let metrics = &mut config.realtime_metrics;
        if let Some(value) = lookup("REALTIME_METRICS_COUNTER_BUCKET_SIZE") {
            metrics.counter_bucket_size =
                parse_var("REALTIME_METRICS_COUNTER_BUCKET_SIZE", &value)?;
        }
        if let Some(value) = lookup("REALTIME_METRICS_COUNTER_TTL_MS") {
            metrics.counter_ttl_ms = parse_var("REALTIME_METRICS_COUNTER_TTL_MS", &value)?;
        }
        if let Some(value) = lookup("REALTIME_METRICS_HISTOGRAM_BUCKET_SIZE") {
            metrics.histogram_bucket_size =
                parse_var("REALTIME_METRICS_HISTOGRAM_BUCKET_SIZE", &value)?;
        }
        if let Some(value) = lookup("REALTIME_METRICS_HISTOGRAM_TTL_MS") {
            metrics.histogram_ttl_ms = parse_var("REALTIME_METRICS_HISTOGRAM_TTL_MS", &value)?;
        }

        // Logging
        if let Some(level) = lookup("REALTIME_METRICS_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("REALTIME_METRICS_LOG_FORMAT") {
            config.logging.format = serde_yaml::from_str(&format)
                .map_err(|e| MetricsError::config(format!("Invalid log format: {}", e)))?;
        }

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| MetricsError::config(format!("Invalid value for {}: {}", name, e)))
}
