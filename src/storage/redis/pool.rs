//! Redis connection pool and core connection management
//!
//! This module provides Redis connectivity, connection sharing, and health checks.

use crate::config::RedisConfig;
use crate::utils::error::{MetricsError, Result};
use redis::{Client, aio::MultiplexedConnection};
use std::time::Duration;
use tracing::{debug, info};

/// Redis connection pool
///
/// Wraps a single multiplexed connection; cloning the pool shares it.
#[derive(Debug, Clone)]
pub struct RedisPool {
    pub(crate) connection: MultiplexedConnection,
    pub(crate) config: RedisConfig,
}

/// Redis connection wrapper
pub struct RedisConnection {
    pub(crate) conn: MultiplexedConnection,
}

impl RedisPool {
    /// Create a new Redis pool
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        info!("Creating Redis connection pool");
        debug!("Redis URL: {}", Self::sanitize_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(MetricsError::Redis)?;

        let timeout = Duration::from_secs(config.connection_timeout);
        let connection =
            tokio::time::timeout(timeout, client.get_multiplexed_async_connection())
                .await
                .map_err(|_| {
                    MetricsError::store_unavailable(format!(
                        "timed out after {}s connecting to {}",
                        config.connection_timeout,
                        Self::sanitize_url(&config.url)
                    ))
                })?
                .map_err(MetricsError::Redis)?;

        info!("Redis connection pool created successfully");
        Ok(Self {
            connection,
            config: config.clone(),
        })
    }

    /// Get a connection from the pool
    pub async fn get_connection(&self) -> Result<RedisConnection> {
        Ok(RedisConnection {
            conn: self.connection.clone(),
        })
    }

    /// Configuration this pool was created from
    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing Redis health check");

        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;

        debug!("Redis health check passed");
        Ok(())
    }

    /// Sanitize Redis URL for logging (hide password)
    pub(crate) fn sanitize_url(url: &str) -> String {
        if let Ok(parsed) = url::Url::parse(url) {
            let mut sanitized = parsed.clone();
            if sanitized.password().is_some() {
                let _ = sanitized.set_password(Some("***"));
            }
            sanitized.to_string()
        } else {
            "invalid_url".to_string()
        }
    }
}
