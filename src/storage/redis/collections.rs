//! Redis Set operations

use super::pool::RedisPool;
use crate::utils::error::{MetricsError, Result};
use redis::AsyncCommands;
use std::collections::HashSet;

/// Members whose SREM reply reports an actual removal
///
/// `replies` are the per-member SREM results in the order of `members`.
pub(crate) fn removed_members(members: &[u64], replies: &[i64]) -> HashSet<u64> {
    members
        .iter()
        .zip(replies)
        .filter(|(_, removed)| **removed > 0)
        .map(|(member, _)| *member)
        .collect()
}

/// One MULTI/EXEC transaction with an SREM per member
pub(crate) fn remove_each_pipeline(key: &str, members: &[u64]) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic();
    for member in members {
        pipe.srem(key, *member);
    }
    pipe
}

impl RedisPool {
    /// Add member to set
    pub async fn set_add(&self, key: &str, member: u64) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.conn.sadd(key, member).await.map_err(MetricsError::Redis)?;
        Ok(())
    }

    /// Remove each member in one MULTI/EXEC transaction
    ///
    /// Returns the members that were present when the transaction ran.
    pub async fn set_remove_each(&self, key: &str, members: &[u64]) -> Result<HashSet<u64>> {
        if members.is_empty() {
            return Ok(HashSet::new());
        }

        let mut conn = self.get_connection().await?;
        let replies: Vec<i64> = remove_each_pipeline(key, members)
            .query_async(&mut conn.conn)
            .await
            .map_err(MetricsError::Redis)?;

        Ok(removed_members(members, &replies))
    }

    /// Get all set members
    pub async fn set_members(&self, key: &str) -> Result<HashSet<u64>> {
        let mut conn = self.get_connection().await?;
        let members: HashSet<u64> = conn.conn.smembers(key).await.map_err(MetricsError::Redis)?;
        Ok(members)
    }

    /// Check if member is in set
    pub async fn set_is_member(&self, key: &str, member: u64) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        let is_member: bool = conn
            .conn
            .sismember(key, member)
            .await
            .map_err(MetricsError::Redis)?;
        Ok(is_member)
    }
}
