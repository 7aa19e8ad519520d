//! Basic Redis key operations
//!
//! Single-key reads and keyspace scans.

use super::pool::RedisPool;
use crate::utils::error::{MetricsError, Result};
use redis::AsyncCommands;

/// Keys fetched per SCAN round trip
const SCAN_COUNT: usize = 500;

impl RedisPool {
    /// Get an integer counter, `None` when the key does not exist
    pub async fn get_counter(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.get_connection().await?;
        let value: Option<i64> = conn.conn.get(key).await.map_err(MetricsError::Redis)?;
        Ok(value)
    }

    /// Remaining time to live of a key in milliseconds
    ///
    /// Returns -2 when the key does not exist and -1 when it has no expiry.
    pub async fn pttl(&self, key: &str) -> Result<i64> {
        let mut conn = self.get_connection().await?;
        let ttl: i64 = conn.conn.pttl(key).await.map_err(MetricsError::Redis)?;
        Ok(ttl)
    }

    /// Collect every key matching a glob pattern with incremental SCAN
    pub async fn scan_keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let mut keys = Vec::new();
        let mut cursor: u64 = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_COUNT)
                .query_async(&mut conn.conn)
                .await
                .map_err(MetricsError::Redis)?;

            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }

        Ok(keys)
    }
}
