//! Redis-backed realtime metrics store

use super::buckets::{BucketLayout, counter_key, histogram_key, quantize_duration};
use super::store::RealtimeMetricsStore;
use super::types::{BucketedCount, BucketedDurations, ProjectId};
use crate::config::RealtimeMetricsConfig;
use crate::storage::redis::RedisPool;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Realtime metrics store on top of a shared [`RedisPool`]
#[derive(Debug, Clone)]
pub struct RedisRealtimeMetricsStore {
    pool: Arc<RedisPool>,
    layout: BucketLayout,
}

impl RedisRealtimeMetricsStore {
    /// Create a store, rejecting invalid bucket sizes before any key is touched
    pub fn new(pool: Arc<RedisPool>, config: &RealtimeMetricsConfig) -> Result<Self> {
        let layout = BucketLayout::from_config(config)?;
        info!(
            counter_bucket_size = %layout.counter_bucket_size,
            histogram_bucket_size = %layout.histogram_bucket_size,
            "Created Redis realtime metrics store"
        );
        Ok(Self::with_layout(pool, layout))
    }

    pub fn with_layout(pool: Arc<RedisPool>, layout: BucketLayout) -> Self {
        Self { pool, layout }
    }

    pub fn pool(&self) -> &Arc<RedisPool> {
        &self.pool
    }
}

#[async_trait]
impl RealtimeMetricsStore for RedisRealtimeMetricsStore {
    fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    async fn record_event(&self, project_id: ProjectId, timestamp: u64) -> Result<()> {
        let key = self.layout.counter_key(project_id, timestamp);
        debug!(%key, "Incrementing event counter");
        self.pool
            .increment_with_expiry(&key, self.layout.counter_ttl)
            .await
    }

    async fn record_duration(
        &self,
        project_id: ProjectId,
        timestamp: u64,
        duration: u64,
    ) -> Result<()> {
        let key = self.layout.histogram_key(project_id, timestamp);
        let field = quantize_duration(duration);
        debug!(%key, field, "Incrementing duration histogram");
        self.pool
            .hash_increment_with_expiry(&key, field, self.layout.histogram_ttl)
            .await
    }

    async fn projects(&self) -> Result<Vec<ProjectId>> {
        let keys = self.pool.scan_keys(&self.layout.counter_pattern()).await?;
        let projects: BTreeSet<ProjectId> = keys
            .iter()
            .filter_map(|key| self.layout.parse_counter_key(key))
            .collect();
        Ok(projects.into_iter().collect())
    }

    async fn event_counts(
        &self,
        project_id: ProjectId,
        timestamp: u64,
    ) -> Result<Vec<BucketedCount>> {
        let buckets = self.layout.counter_window(timestamp);
        let keys: Vec<String> = buckets
            .iter()
            .map(|bucket| {
                counter_key(
                    self.layout.prefix(),
                    self.layout.counter_bucket_size,
                    project_id,
                    *bucket,
                )
            })
            .collect();

        let values = self.pool.mget_counters(&keys).await?;
        Ok(buckets
            .into_iter()
            .zip(values)
            .map(|(timestamp, count)| BucketedCount {
                timestamp,
                count: count.unwrap_or(0),
            })
            .collect())
    }

    async fn duration_histograms(
        &self,
        project_id: ProjectId,
        timestamp: u64,
    ) -> Result<Vec<BucketedDurations>> {
        let buckets = self.layout.histogram_window(timestamp);
        let keys: Vec<String> = buckets
            .iter()
            .map(|bucket| {
                histogram_key(
                    self.layout.prefix(),
                    self.layout.histogram_bucket_size,
                    project_id,
                    *bucket,
                )
            })
            .collect();

        let hashes = self.pool.hash_get_all_many(&keys).await?;
        Ok(buckets
            .into_iter()
            .zip(hashes)
            .map(|(timestamp, histogram)| BucketedDurations {
                timestamp,
                histogram: histogram.into_iter().collect(),
            })
            .collect())
    }

    async fn list_members(&self) -> Result<HashSet<ProjectId>> {
        self.pool.set_members(&self.layout.lpq_key()).await
    }

    async fn add_member(&self, project_id: ProjectId) -> Result<()> {
        self.pool.set_add(&self.layout.lpq_key(), project_id).await?;
        info!(project_id, "Added project to low priority queue");
        Ok(())
    }

    async fn remove_members(&self, project_ids: &HashSet<ProjectId>) -> Result<HashSet<ProjectId>> {
        let ids: Vec<ProjectId> = project_ids.iter().copied().collect();
        let removed = self
            .pool
            .set_remove_each(&self.layout.lpq_key(), &ids)
            .await?;
        if !removed.is_empty() {
            info!(?removed, "Removed projects from low priority queue");
        }
        Ok(removed)
    }

    async fn is_member(&self, project_id: ProjectId) -> Result<bool> {
        self.pool
            .set_is_member(&self.layout.lpq_key(), project_id)
            .await
    }

    async fn health_check(&self) -> Result<()> {
        self.pool.health_check().await
    }
}
