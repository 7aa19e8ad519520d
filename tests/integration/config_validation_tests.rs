//! Configuration loading and validation through the public API

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use realtime_metrics::config::{Config, LogFormat, RealtimeMetricsConfig, Validate};
    use realtime_metrics::{BucketLayout, InMemoryRealtimeMetricsStore};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_config_file() {
        let file = write_config(
            r#"
redis:
  url: "redis://cache.internal:6380"
  connection_timeout: 2
realtime_metrics:
  counter_bucket_size: 60
  counter_ttl_ms: 600000
  histogram_bucket_size: 30
  histogram_ttl_ms: 900000
logging:
  level: debug
  format: json
"#,
        );

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.redis.url, "redis://cache.internal:6380");
        assert_eq!(config.redis.connection_timeout, 2);
        assert_eq!(config.realtime_metrics.counter_bucket_size, 60);
        assert_eq!(config.realtime_metrics.histogram_ttl_ms, 900_000);
        assert_eq!(config.logging.format, LogFormat::Json);

        let layout = assert_ok!(BucketLayout::from_config(&config.realtime_metrics));
        assert_eq!(
            layout.counter_key(42, 150),
            "symbolicate_event_low_priority:counter:60:42:120"
        );
    }

    #[tokio::test]
    async fn test_partial_config_file_uses_defaults() {
        let file = write_config("realtime_metrics:\n  counter_bucket_size: 5\n");

        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.realtime_metrics.counter_bucket_size, 5);
        assert_eq!(
            config.realtime_metrics.histogram_bucket_size,
            RealtimeMetricsConfig::default().histogram_bucket_size
        );
        assert_eq!(config.redis.url, "redis://localhost:6379");
    }

    #[tokio::test]
    async fn test_zero_bucket_size_in_file_is_rejected() {
        let file = write_config("realtime_metrics:\n  counter_bucket_size: 0\n");

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("counter bucket size"));
    }

    #[tokio::test]
    async fn test_negative_bucket_size_in_file_is_rejected() {
        let file = write_config("realtime_metrics:\n  histogram_bucket_size: -10\n");

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(err.is_configuration_error());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let err = assert_err!(Config::from_file("/nonexistent/realtime_metrics.yaml").await);
        assert!(!err.is_store_error());
    }

    #[test]
    fn test_validate_matches_store_construction() {
        for size in [-5, 0, 1, 10] {
            let config = RealtimeMetricsConfig {
                counter_bucket_size: size,
                ..RealtimeMetricsConfig::default()
            };
            assert_eq!(
                config.validate().is_ok(),
                InMemoryRealtimeMetricsStore::new(&config).is_ok(),
                "bucket size {}",
                size
            );
        }
    }
}
