//! Realtime metrics configuration
//!
//! Bucket sizes are kept signed so that a zero or negative value coming from a
//! config file is reported as an invalid configuration instead of a parse error.

use super::{
    default_counter_bucket_size, default_counter_ttl_ms, default_histogram_bucket_size,
    default_histogram_ttl_ms,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bucket layout and retention for the two counter families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeMetricsConfig {
    /// Width in seconds of the event counter buckets
    #[serde(default = "default_counter_bucket_size")]
    pub counter_bucket_size: i64,
    /// How long an event counter is kept after its last increment
    #[serde(default = "default_counter_ttl_ms")]
    pub counter_ttl_ms: u64,
    /// Width in seconds of the duration histogram buckets
    #[serde(default = "default_histogram_bucket_size")]
    pub histogram_bucket_size: i64,
    /// How long a duration histogram is kept after its last increment
    #[serde(default = "default_histogram_ttl_ms")]
    pub histogram_ttl_ms: u64,
}

impl Default for RealtimeMetricsConfig {
    fn default() -> Self {
        Self {
            counter_bucket_size: default_counter_bucket_size(),
            counter_ttl_ms: default_counter_ttl_ms(),
            histogram_bucket_size: default_histogram_bucket_size(),
            histogram_ttl_ms: default_histogram_ttl_ms(),
        }
    }
}

impl RealtimeMetricsConfig {
    pub fn counter_ttl(&self) -> Duration {
        Duration::from_millis(self.counter_ttl_ms)
    }

    pub fn histogram_ttl(&self) -> Duration {
        Duration::from_millis(self.histogram_ttl_ms)
    }

    /// Merge realtime metrics configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.counter_bucket_size != default_counter_bucket_size() {
            self.counter_bucket_size = other.counter_bucket_size;
        }
        if other.counter_ttl_ms != default_counter_ttl_ms() {
            self.counter_ttl_ms = other.counter_ttl_ms;
        }
        if other.histogram_bucket_size != default_histogram_bucket_size() {
            self.histogram_bucket_size = other.histogram_bucket_size;
        }
        if other.histogram_ttl_ms != default_histogram_ttl_ms() {
            self.histogram_ttl_ms = other.histogram_ttl_ms;
        }
        self
    }
}
