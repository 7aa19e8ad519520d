//! Redis backend end-to-end tests
//!
//! Every test runs under its own key prefix, so they can share one server.

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_bucket_count, project_set};
    use crate::common::{MetricsConfigFactory, TestStores};
    use crate::skip_without_env;
    use realtime_metrics::RealtimeMetricsStore;
    use std::time::Duration;

    #[tokio::test]
    #[ignore]
    async fn test_redis_health_check() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::create()).await;
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_pool_clone_outlives_original() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::create()).await;

        // the multiplexed connection lives as long as any clone of the pool
        let pool = store.pool().as_ref().clone();
        drop(store);
        pool.health_check().await.unwrap();
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_event_counter_key_and_expiry() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::with_bucket_sizes(60, 10)).await;

        store.record_event(42, 150).await.unwrap();
        store.record_event(42, 179).await.unwrap();

        let key = format!("{}:counter:60:42:120", store.layout().prefix());
        assert_eq!(store.pool().get_counter(&key).await.unwrap(), Some(2));

        let pttl = store.pool().pttl(&key).await.unwrap();
        assert!(pttl > 0 && pttl <= 120_000, "unexpected pttl {}", pttl);
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_write_refreshes_expiry() {
        skip_without_env!("REDIS_URL");
        let config = realtime_metrics::config::RealtimeMetricsConfig {
            counter_ttl_ms: 2_000,
            ..MetricsConfigFactory::create()
        };
        let store = TestStores::redis(&config).await;
        let key = store.layout().counter_key(1, 100);

        store.record_event(1, 100).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        store.record_event(1, 101).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_200)).await;

        assert_eq!(store.pool().get_counter(&key).await.unwrap(), Some(2));

        tokio::time::sleep(Duration::from_millis(1_200)).await;
        assert_eq!(store.pool().get_counter(&key).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_duration_histogram() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::create()).await;

        store.record_duration(3, 500, 23).await.unwrap();
        store.record_duration(3, 505, 29).await.unwrap();
        store.record_duration(3, 509, 30).await.unwrap();

        let key = store.layout().histogram_key(3, 500);
        let histogram = store.pool().hash_get_all(&key).await.unwrap();
        assert_eq!(histogram.get(&20), Some(&2));
        assert_eq!(histogram.get(&30), Some(&1));
        assert!(store.pool().pttl(&key).await.unwrap() > 0);

        let histograms = store.duration_histograms(3, 509).await.unwrap();
        assert_eq!(histograms.last().unwrap().total(), 3);
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_read_side() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::create()).await;

        store.record_event(8, 1_000).await.unwrap();
        store.record_event(8, 1_005).await.unwrap();
        store.record_event(8, 990).await.unwrap();
        store.record_event(4, 1_000).await.unwrap();

        let counts = store.event_counts(8, 1_005).await.unwrap();
        assert_bucket_count(&counts, 1_000, 2);
        assert_bucket_count(&counts, 990, 1);
        assert_bucket_count(&counts, 970, 0);

        assert_eq!(store.projects().await.unwrap(), vec![4, 8]);
    }

    #[tokio::test]
    #[ignore]
    async fn test_redis_lpq_membership() {
        skip_without_env!("REDIS_URL");
        let store = TestStores::redis(&MetricsConfigFactory::create()).await;

        store.add_member(5).await.unwrap();
        store.add_member(5).await.unwrap();
        assert_eq!(store.list_members().await.unwrap(), project_set(&[5]));
        assert!(store.is_member(5).await.unwrap());
        assert!(!store.is_member(6).await.unwrap());

        let removed = store.remove_members(&project_set(&[5, 6])).await.unwrap();
        assert_eq!(removed, project_set(&[5]));

        let removed = store.remove_members(&project_set(&[7])).await.unwrap();
        assert!(removed.is_empty());
        assert!(store.list_members().await.unwrap().is_empty());
    }
}
