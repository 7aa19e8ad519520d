//! Realtime metrics types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque identifier of the entity being counted (a project id)
pub type ProjectId = u64;

/// Number of events recorded in one counter bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketedCount {
    /// Floored timestamp of the bucket, in seconds since the UNIX epoch
    pub timestamp: u64,
    pub count: i64,
}

/// Duration histogram of one histogram bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketedDurations {
    /// Floored timestamp of the bucket, in seconds since the UNIX epoch
    pub timestamp: u64,
    /// Quantized duration in seconds mapped to the number of occurrences
    pub histogram: BTreeMap<u64, i64>,
}

impl BucketedDurations {
    /// Total number of durations recorded in this bucket
    pub fn total(&self) -> i64 {
        self.histogram.values().sum()
    }
}

/// Processing path a project's work is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingQueue {
    /// Regular queue; every project starts here
    #[default]
    Normal,
    /// Low priority queue
    LowPriority,
}

impl ProcessingQueue {
    pub fn from_membership(is_member: bool) -> Self {
        if is_member {
            Self::LowPriority
        } else {
            Self::Normal
        }
    }
}
