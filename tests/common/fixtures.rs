//! Test fixtures and store factories

use realtime_metrics::config::{RealtimeMetricsConfig, RedisConfig};
use realtime_metrics::{
    BucketLayout, InMemoryRealtimeMetricsStore, RedisPool, RedisRealtimeMetricsStore,
};
use std::sync::Arc;
use uuid::Uuid;

/// Factory for bucket layouts used across tests
pub struct MetricsConfigFactory;

impl MetricsConfigFactory {
    /// 10 second buckets for both families
    pub fn create() -> RealtimeMetricsConfig {
        RealtimeMetricsConfig {
            counter_bucket_size: 10,
            counter_ttl_ms: 120_000,
            histogram_bucket_size: 10,
            histogram_ttl_ms: 180_000,
        }
    }

    /// No bucketing: every second is its own bucket
    pub fn unbucketed() -> RealtimeMetricsConfig {
        RealtimeMetricsConfig {
            counter_bucket_size: 1,
            histogram_bucket_size: 1,
            ..Self::create()
        }
    }

    pub fn with_bucket_sizes(counter: i64, histogram: i64) -> RealtimeMetricsConfig {
        RealtimeMetricsConfig {
            counter_bucket_size: counter,
            histogram_bucket_size: histogram,
            ..Self::create()
        }
    }
}

/// Store constructors
pub struct TestStores;

impl TestStores {
    pub fn memory(config: &RealtimeMetricsConfig) -> InMemoryRealtimeMetricsStore {
        InMemoryRealtimeMetricsStore::new(config).expect("valid test config")
    }

    /// Redis store under a per-test key prefix so parallel tests never collide
    pub async fn redis(config: &RealtimeMetricsConfig) -> RedisRealtimeMetricsStore {
        let url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
        let pool = RedisPool::new(&RedisConfig {
            url,
            connection_timeout: 5,
        })
        .await
        .expect("Redis must be reachable");

        let prefix = format!("realtime_metrics_test_{}", Uuid::new_v4().simple());
        let layout = BucketLayout::with_prefix(prefix, config).expect("valid test config");
        RedisRealtimeMetricsStore::with_layout(Arc::new(pool), layout)
    }
}
