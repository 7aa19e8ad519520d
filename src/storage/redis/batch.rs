//! Batch Redis operations
//!
//! This module provides batch reads for efficient multi-key lookups.

use super::pool::RedisPool;
use crate::utils::error::{MetricsError, Result};
use std::collections::HashMap;

impl RedisPool {
    /// Get multiple integer counters at once
    pub async fn mget_counters(&self, keys: &[String]) -> Result<Vec<Option<i64>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;
        // explicit MGET: the typed helper sends GET for a single key
        let values: Vec<Option<i64>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;
        Ok(values)
    }

    /// Fetch several hashes in one pipelined round trip
    pub async fn hash_get_all_many(&self, keys: &[String]) -> Result<Vec<HashMap<u64, i64>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;
        let mut pipe = redis::pipe();
        for key in keys {
            pipe.hgetall(key);
        }

        let hashes: Vec<HashMap<u64, i64>> = pipe
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;
        Ok(hashes)
    }
}
