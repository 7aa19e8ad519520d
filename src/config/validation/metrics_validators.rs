//! Realtime metrics configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for RealtimeMetricsConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating realtime metrics configuration");

        if self.counter_bucket_size <= 0 {
            return Err("counter bucket size must be at least 1".to_string());
        }

        if self.histogram_bucket_size <= 0 {
            return Err("histogram bucket size must be at least 1".to_string());
        }

        if self.counter_ttl_ms == 0 {
            return Err("counter ttl must be greater than 0".to_string());
        }

        if self.histogram_ttl_ms == 0 {
            return Err("histogram ttl must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
