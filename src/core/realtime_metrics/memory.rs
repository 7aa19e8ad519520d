//! In-memory realtime metrics store
//!
//! Honors the same key layout, quantization and sliding expiry as the Redis
//! store. Expiry is measured with `tokio::time::Instant`, so tests can drive it
//! with a paused clock. Expired keys are dropped whenever a write creates a new
//! key, so memory is bounded by the keys live within one TTL.

use super::buckets::{BucketLayout, quantize_duration};
use super::store::RealtimeMetricsStore;
use super::types::{BucketedCount, BucketedDurations, ProjectId};
use crate::config::RealtimeMetricsConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Expiring<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Expiring<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Realtime metrics store kept in process memory
#[derive(Debug)]
pub struct InMemoryRealtimeMetricsStore {
    layout: BucketLayout,
    counters: DashMap<String, Expiring<i64>>,
    histograms: DashMap<String, Expiring<HashMap<u64, i64>>>,
    lpq: Mutex<HashSet<ProjectId>>,
}

impl InMemoryRealtimeMetricsStore {
    pub fn new(config: &RealtimeMetricsConfig) -> Result<Self> {
        Ok(Self::with_layout(BucketLayout::from_config(config)?))
    }

    pub fn with_layout(layout: BucketLayout) -> Self {
        Self {
            layout,
            counters: DashMap::new(),
            histograms: DashMap::new(),
            lpq: Mutex::new(HashSet::new()),
        }
    }

    /// Current value of a live counter key
    pub fn counter(&self, key: &str) -> Option<i64> {
        let now = Instant::now();
        self.counters
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value)
    }

    /// Current fields of a live histogram key
    pub fn histogram(&self, key: &str) -> Option<HashMap<u64, i64>> {
        let now = Instant::now();
        self.histograms
            .get(key)
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.value.clone())
    }

    /// Remaining time to live of a counter or histogram key
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let expires_at = self
            .counters
            .get(key)
            .map(|entry| entry.expires_at)
            .or_else(|| self.histograms.get(key).map(|entry| entry.expires_at))?;
        (expires_at > now).then(|| expires_at - now)
    }

    /// Number of counter and histogram keys held, expired or not
    pub fn key_count(&self) -> usize {
        self.counters.len() + self.histograms.len()
    }

    /// Drop every expired counter and histogram
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.counters.retain(|_, entry| entry.is_live(now));
        self.histograms.retain(|_, entry| entry.is_live(now));
    }
}

#[async_trait]
impl RealtimeMetricsStore for InMemoryRealtimeMetricsStore {
    fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    async fn record_event(&self, project_id: ProjectId, timestamp: u64) -> Result<()> {
        let key = self.layout.counter_key(project_id, timestamp);
        debug!(%key, "Incrementing event counter");

        let now = Instant::now();
        let expires_at = now + self.layout.counter_ttl;
        let created = match self.counters.entry(key) {
            Entry::Occupied(mut entry) => {
                let entry = entry.get_mut();
                if !entry.is_live(now) {
                    entry.value = 0;
                }
                entry.value += 1;
                entry.expires_at = expires_at;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(Expiring {
                    value: 1,
                    expires_at,
                });
                true
            }
        };

        // shard guards are released above; retain locks every shard
        if created {
            self.purge_expired();
        }
        Ok(())
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

        let now = Instant::now();
        let expires_at = now + self.layout.histogram_ttl;
        let created = match self.histograms.entry(key) {
            Entry::Occupied(mut entry) => {
                let entry = entry.get_mut();
                if !entry.is_live(now) {
                    entry.value.clear();
                }
                *entry.value.entry(field).or_insert(0) += 1;
                entry.expires_at = expires_at;
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(Expiring {
                    value: HashMap::from([(field, 1)]),
                    expires_at,
                });
                true
            }
        };

        if created {
            self.purge_expired();
        }
        Ok(())
    }

    async fn projects(&self) -> Result<Vec<ProjectId>> {
        self.purge_expired();
        let projects: BTreeSet<ProjectId> = self
            .counters
            .iter()
            .filter_map(|entry| self.layout.parse_counter_key(entry.key()))
            .collect();
        Ok(projects.into_iter().collect())
    }

    async fn event_counts(
        &self,
        project_id: ProjectId,
        timestamp: u64,
    ) -> Result<Vec<BucketedCount>> {
        Ok(self
            .layout
            .counter_window(timestamp)
            .into_iter()
            .map(|bucket| BucketedCount {
                timestamp: bucket,
                count: self
                    .counter(&self.layout.counter_key(project_id, bucket))
                    .unwrap_or(0),
            })
            .collect())
    }

    async fn duration_histograms(
        &self,
        project_id: ProjectId,
        timestamp: u64,
    ) -> Result<Vec<BucketedDurations>> {
        Ok(self
            .layout
            .histogram_window(timestamp)
            .into_iter()
            .map(|bucket| BucketedDurations {
                timestamp: bucket,
                histogram: self
                    .histogram(&self.layout.histogram_key(project_id, bucket))
                    .map(|fields| fields.into_iter().collect())
                    .unwrap_or_else(BTreeMap::new),
            })
            .collect())
    }

    async fn list_members(&self) -> Result<HashSet<ProjectId>> {
        Ok(self.lpq.lock().clone())
    }

    async fn add_member(&self, project_id: ProjectId) -> Result<()> {
        if self.lpq.lock().insert(project_id) {
            info!(project_id, "Added project to low priority queue");
        }
        Ok(())
    }

    async fn remove_members(&self, project_ids: &HashSet<ProjectId>) -> Result<HashSet<ProjectId>> {
        let removed: HashSet<ProjectId> = {
            let mut lpq = self.lpq.lock();
            project_ids
                .iter()
                .copied()
                .filter(|project_id| lpq.remove(project_id))
                .collect()
        };
        if !removed.is_empty() {
            info!(?removed, "Removed projects from low priority queue");
        }
        Ok(removed)
    }

    async fn is_member(&self, project_id: ProjectId) -> Result<bool> {
        Ok(self.lpq.lock().contains(&project_id))
    }
}
