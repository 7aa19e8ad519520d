//! Redis Hash operations

use super::atomic::ttl_millis;
use super::pool::RedisPool;
use crate::utils::error::{MetricsError, Result};
use redis::AsyncCommands;
use std::collections::HashMap;
use std::time::Duration;

/// `HINCRBY key field 1` and `PEXPIRE key ttl` wrapped in MULTI/EXEC
pub(crate) fn hash_increment_pipeline(key: &str, field: u64, ttl: Duration) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .hincr(key, field, 1)
        .ignore()
        .pexpire(key, ttl_millis(ttl))
        .ignore();
    pipe
}

impl RedisPool {
    /// `HINCRBY key field 1` and `PEXPIRE key ttl` in one MULTI/EXEC batch
    pub async fn hash_increment_with_expiry(
        &self,
        key: &str,
        field: u64,
        ttl: Duration,
    ) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = hash_increment_pipeline(key, field, ttl)
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;
        Ok(())
    }

    /// Get all hash fields and values, empty when the key does not exist
    pub async fn hash_get_all(&self, key: &str) -> Result<HashMap<u64, i64>> {
        let mut conn = self.get_connection().await?;
        let hash: HashMap<u64, i64> = conn.conn.hgetall(key).await.map_err(MetricsError::Redis)?;
        Ok(hash)
    }
}
