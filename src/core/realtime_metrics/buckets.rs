//! Bucket math and the store key layout
//!
//! Keys are shared with every other reader and writer of the same store:
//!
//! ```text
//! <prefix>:counter:<counter_bucket_size>:<project_id>:<bucket_timestamp>
//! <prefix>:histogram:<histogram_bucket_size>:<project_id>:<bucket_timestamp>
//! <prefix>:lpq
//! ```

use super::types::ProjectId;
use crate::config::{RealtimeMetricsConfig, Validate};
use crate::utils::error::{MetricsError, Result};
use std::fmt;
use std::num::NonZeroU64;
use std::time::Duration;

/// Prefix shared by every key this service writes
pub const KEY_PREFIX: &str = "symbolicate_event_low_priority";

/// Durations are truncated to a multiple of this many seconds
pub const DURATION_QUANTUM: u64 = 10;

/// Width of a time bucket in seconds, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketSize(NonZeroU64);

impl BucketSize {
    pub fn new(seconds: u64) -> Option<Self> {
        NonZeroU64::new(seconds).map(Self)
    }

    pub fn seconds(self) -> u64 {
        self.0.get()
    }

    /// Floor a timestamp to the start of its bucket
    pub fn floor(self, timestamp: u64) -> u64 {
        timestamp - timestamp % self.seconds()
    }
}

impl TryFrom<i64> for BucketSize {
    type Error = MetricsError;

    fn try_from(seconds: i64) -> Result<Self> {
        u64::try_from(seconds)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                MetricsError::invalid_configuration(format!(
                    "bucket size must be at least 1, got {}",
                    seconds
                ))
            })
    }
}

impl fmt::Display for BucketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Truncate a duration to the nearest lower multiple of [`DURATION_QUANTUM`]
pub fn quantize_duration(duration: u64) -> u64 {
    duration - duration % DURATION_QUANTUM
}

/// Key of the rate counter for an already floored bucket timestamp
pub fn counter_key(
    prefix: &str,
    bucket_size: BucketSize,
    project_id: ProjectId,
    bucket_timestamp: u64,
) -> String {
    format!(
        "{}:counter:{}:{}:{}",
        prefix, bucket_size, project_id, bucket_timestamp
    )
}

/// Key of the duration histogram for an already floored bucket timestamp
pub fn histogram_key(
    prefix: &str,
    bucket_size: BucketSize,
    project_id: ProjectId,
    bucket_timestamp: u64,
) -> String {
    format!(
        "{}:histogram:{}:{}:{}",
        prefix, bucket_size, project_id, bucket_timestamp
    )
}

/// Key of the low priority queue membership set
pub fn lpq_key(prefix: &str) -> String {
    format!("{}:lpq", prefix)
}

/// Validated bucket sizes and retention for both counter families
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketLayout {
    prefix: String,
    pub counter_bucket_size: BucketSize,
    pub counter_ttl: Duration,
    pub histogram_bucket_size: BucketSize,
    pub histogram_ttl: Duration,
}

impl BucketLayout {
    /// Validate the configuration and build the layout with [`KEY_PREFIX`]
    pub fn from_config(config: &RealtimeMetricsConfig) -> Result<Self> {
        Self::with_prefix(KEY_PREFIX, config)
    }

    pub fn with_prefix(prefix: impl Into<String>, config: &RealtimeMetricsConfig) -> Result<Self> {
        config
            .validate()
            .map_err(MetricsError::invalid_configuration)?;

        Ok(Self {
            prefix: prefix.into(),
            counter_bucket_size: BucketSize::try_from(config.counter_bucket_size)?,
            counter_ttl: config.counter_ttl(),
            histogram_bucket_size: BucketSize::try_from(config.histogram_bucket_size)?,
            histogram_ttl: config.histogram_ttl(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Counter key for the bucket `timestamp` falls into
    pub fn counter_key(&self, project_id: ProjectId, timestamp: u64) -> String {
        let size = self.counter_bucket_size;
        counter_key(&self.prefix, size, project_id, size.floor(timestamp))
    }

    /// Histogram key for the bucket `timestamp` falls into
    pub fn histogram_key(&self, project_id: ProjectId, timestamp: u64) -> String {
        let size = self.histogram_bucket_size;
        histogram_key(&self.prefix, size, project_id, size.floor(timestamp))
    }

    pub fn lpq_key(&self) -> String {
        lpq_key(&self.prefix)
    }

    /// Glob pattern matching every counter key of the current bucket size
    pub fn counter_pattern(&self) -> String {
        format!("{}:counter:{}:*", self.prefix, self.counter_bucket_size)
    }

    /// Project id encoded in a counter key of the current bucket size
    pub fn parse_counter_key(&self, key: &str) -> Option<ProjectId> {
        let rest = key
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(":counter:")?;
        let mut parts = rest.split(':');
        let size: u64 = parts.next()?.parse().ok()?;
        if size != self.counter_bucket_size.seconds() {
            return None;
        }
        let project_id = parts.next()?.parse().ok()?;
        let _timestamp: u64 = parts.next()?.parse().ok()?;
        parts.next().is_none().then_some(project_id)
    }

    /// Counter bucket timestamps in the retention window ending at `timestamp`
    pub fn counter_window(&self, timestamp: u64) -> Vec<u64> {
        window(self.counter_bucket_size, self.counter_ttl, timestamp)
    }

    /// Histogram bucket timestamps in the retention window ending at `timestamp`
    pub fn histogram_window(&self, timestamp: u64) -> Vec<u64> {
        window(self.histogram_bucket_size, self.histogram_ttl, timestamp)
    }
}

fn window(size: BucketSize, ttl: Duration, timestamp: u64) -> Vec<u64> {
    let end = size.floor(timestamp);
    let start = size.floor(timestamp.saturating_sub(ttl.as_secs()));
    (start..=end).step_by(size.seconds() as usize).collect()
}
