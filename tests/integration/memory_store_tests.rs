//! Integration tests for the in-memory realtime metrics store
//!
//! These run through the `RealtimeMetricsStore` trait object the way the
//! ingestion pipeline and the decision process use it.

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_bucket_count, project_set};
    use crate::common::{MetricsConfigFactory, TestStores};
    use realtime_metrics::{ProcessingQueue, RealtimeMetricsStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ingest_then_read_counts() {
        let store: Arc<dyn RealtimeMetricsStore> =
            Arc::new(TestStores::memory(&MetricsConfigFactory::create()));

        for timestamp in [1000, 1001, 1009, 990, 995] {
            store.record_event(7, timestamp).await.unwrap();
        }

        let counts = store.event_counts(7, 1005).await.unwrap();
        assert_bucket_count(&counts, 1000, 3);
        assert_bucket_count(&counts, 990, 2);
        assert_bucket_count(&counts, 980, 0);
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 5);
    }

    #[tokio::test]
    async fn test_ingest_then_read_durations() {
        let store = TestStores::memory(&MetricsConfigFactory::create());

        store.record_duration(3, 500, 23).await.unwrap();
        store.record_duration(3, 505, 29).await.unwrap();
        store.record_duration(3, 509, 30).await.unwrap();

        let histograms = store.duration_histograms(3, 509).await.unwrap();
        let bucket = histograms
            .iter()
            .find(|h| h.timestamp == 500)
            .expect("bucket 500 present");
        assert_eq!(bucket.histogram.get(&20), Some(&2));
        assert_eq!(bucket.histogram.get(&30), Some(&1));
        assert_eq!(bucket.total(), 3);
    }

    #[tokio::test]
    async fn test_unbucketed_layout_keeps_every_second() {
        let store = TestStores::memory(&MetricsConfigFactory::unbucketed());

        store.record_event(1, 100).await.unwrap();
        store.record_event(1, 101).await.unwrap();

        assert_eq!(
            store.counter(&store.layout().counter_key(1, 100)),
            Some(1)
        );
        assert_eq!(
            store.counter(&store.layout().counter_key(1, 101)),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_mixed_bucket_sizes() {
        let store = TestStores::memory(&MetricsConfigFactory::with_bucket_sizes(60, 5));

        store.record_event(42, 150).await.unwrap();
        store.record_duration(42, 153, 12).await.unwrap();

        assert_eq!(
            store.counter("symbolicate_event_low_priority:counter:60:42:120"),
            Some(1)
        );
        let histogram = store
            .histogram("symbolicate_event_low_priority:histogram:5:42:150")
            .expect("histogram written");
        assert_eq!(histogram.get(&10), Some(&1));
    }

    #[tokio::test]
    async fn test_projects_reflect_recorded_events() {
        let store = TestStores::memory(&MetricsConfigFactory::create());
        store.record_event(9, 100).await.unwrap();
        store.record_event(2, 100).await.unwrap();
        store.record_event(9, 200).await.unwrap();
        store.record_duration(5, 100, 10).await.unwrap();

        assert_eq!(store.projects().await.unwrap(), vec![2, 9]);
    }

    #[tokio::test]
    async fn test_lpq_round_trip() {
        let store: Arc<dyn RealtimeMetricsStore> =
            Arc::new(TestStores::memory(&MetricsConfigFactory::create()));

        assert_eq!(store.queue_for(5).await.unwrap(), ProcessingQueue::Normal);

        store.add_member(5).await.unwrap();
        store.add_member(5).await.unwrap();
        store.add_member(8).await.unwrap();
        assert_eq!(store.list_members().await.unwrap(), project_set(&[5, 8]));
        assert_eq!(
            store.queue_for(5).await.unwrap(),
            ProcessingQueue::LowPriority
        );

        let removed = store.remove_members(&project_set(&[5, 6])).await.unwrap();
        assert_eq!(removed, project_set(&[5]));
        assert_eq!(store.list_members().await.unwrap(), project_set(&[8]));

        let removed = store.remove_members(&project_set(&[5])).await.unwrap();
        assert!(removed.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_writers_share_one_store() {
        let store = Arc::new(TestStores::memory(&MetricsConfigFactory::create()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    for _ in 0..250 {
                        store.record_event(11, 1_000).await.unwrap();
                        store.record_duration(11, 1_000, 45).await.unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        let counts = store.event_counts(11, 1_000).await.unwrap();
        assert_bucket_count(&counts, 1_000, 2_000);

        let histograms = store.duration_histograms(11, 1_000).await.unwrap();
        let last = histograms.last().expect("window is never empty");
        assert_eq!(last.timestamp, 1_000);
        assert_eq!(last.histogram.get(&40), Some(&2_000));
    }
}
