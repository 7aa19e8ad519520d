//! Redis counter writes
//!
//! Each increment is sent together with a PEXPIRE on the same key so the
//! key's expiry slides forward on every write.

use super::pool::RedisPool;
use crate::utils::error::{MetricsError, Result};
use std::time::Duration;

/// Clamp a TTL to the signed millisecond range PEXPIRE accepts
pub(crate) fn ttl_millis(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX)
}

/// `INCR key` and `PEXPIRE key ttl` wrapped in MULTI/EXEC
pub(crate) fn increment_pipeline(key: &str, ttl: Duration) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .incr(key, 1)
        .ignore()
        .pexpire(key, ttl_millis(ttl))
        .ignore();
    pipe
}

impl RedisPool {
    /// `INCR key` and `PEXPIRE key ttl` in one MULTI/EXEC batch
    pub async fn increment_with_expiry(&self, key: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = increment_pipeline(key, ttl)
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;
        Ok(())
    }
}
