//! Storage configuration validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for RedisConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Redis URL cannot be empty".to_string());
        }

        if !self.url.starts_with("redis://")
            && !self.url.starts_with("rediss://")
            && !self.url.starts_with("redis+unix://")
            && !self.url.starts_with("unix://")
        {
            return Err("Redis URL must start with redis://, rediss:// or unix://".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Redis connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
