//! Realtime load-classification metrics
//!
//! Per-project event counters and duration histograms in fixed-width,
//! self-expiring time buckets, plus the set of projects routed to the low
//! priority queue. Two backends implement [`RealtimeMetricsStore`]: Redis for
//! production and an in-memory map for tests and local runs.

mod buckets;
mod memory;
mod redis_store;
mod store;
mod types;


pub use buckets::{
    BucketLayout, BucketSize, DURATION_QUANTUM, KEY_PREFIX, counter_key, histogram_key, lpq_key,
    quantize_duration,
};
pub use memory::InMemoryRealtimeMetricsStore;
pub use redis_store::RedisRealtimeMetricsStore;
pub use store::RealtimeMetricsStore;
pub use types::{BucketedCount, BucketedDurations, ProcessingQueue, ProjectId};
