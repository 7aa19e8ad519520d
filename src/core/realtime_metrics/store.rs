//! Realtime metrics store trait

use super::buckets::BucketLayout;
use super::types::{BucketedCount, BucketedDurations, ProcessingQueue, ProjectId};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Time-bucketed event and duration counters plus the low priority queue set
///
/// Counters are pure accumulators: concurrent increments of the same bucket
/// from any number of callers add up regardless of arrival order. Every write
/// resets the expiry of the key it touches. Store failures are returned as is,
/// nothing is retried. Retrying a `record_*` call after an ambiguous failure
/// may count the same event twice.
#[async_trait]
pub trait RealtimeMetricsStore: Send + Sync + std::fmt::Debug {
    /// Bucket sizes and retention this store was built with
    fn layout(&self) -> &BucketLayout;

    /// Count one event for `project_id` in the bucket containing `timestamp`
    async fn record_event(&self, project_id: ProjectId, timestamp: u64) -> Result<()>;

    /// Count one processing duration (seconds) in the bucket containing `timestamp`
    ///
    /// The duration is truncated to a multiple of ten seconds before it is used
    /// as the histogram field.
    async fn record_duration(
        &self,
        project_id: ProjectId,
        timestamp: u64,
        duration: u64,
    ) -> Result<()>;

    /// Projects that currently have at least one live event counter
    async fn projects(&self) -> Result<Vec<ProjectId>>;

    /// Event counts for every counter bucket in the retention window ending at `timestamp`
    ///
    /// Buckets without data are reported with a count of zero.
    async fn event_counts(&self, project_id: ProjectId, timestamp: u64)
    -> Result<Vec<BucketedCount>>;

    /// Duration histograms for every histogram bucket in the retention window
    /// ending at `timestamp`
    async fn duration_histograms(
        &self,
        project_id: ProjectId,
        timestamp: u64,
    ) -> Result<Vec<BucketedDurations>>;

    /// Snapshot of the projects assigned to the low priority queue
    async fn list_members(&self) -> Result<HashSet<ProjectId>>;

    /// Move a project to the low priority queue; a no-op if it is already there
    async fn add_member(&self, project_id: ProjectId) -> Result<()>;

    /// Move projects back to the regular queue
    ///
    /// Returns the subset of `project_ids` that were members when they were removed.
    async fn remove_members(&self, project_ids: &HashSet<ProjectId>) -> Result<HashSet<ProjectId>>;

    /// Whether a project is assigned to the low priority queue
    async fn is_member(&self, project_id: ProjectId) -> Result<bool> {
        Ok(self.list_members().await?.contains(&project_id))
    }

    /// Queue the ingestion pipeline should route `project_id`'s work to
    async fn queue_for(&self, project_id: ProjectId) -> Result<ProcessingQueue> {
        Ok(ProcessingQueue::from_membership(
            self.is_member(project_id).await?,
        ))
    }

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
