//! Custom assertions

use realtime_metrics::{BucketedCount, ProjectId};
use std::collections::HashSet;

/// Assert the count reported for one bucket
pub fn assert_bucket_count(counts: &[BucketedCount], timestamp: u64, expected: i64) {
    let bucket = counts
        .iter()
        .find(|c| c.timestamp == timestamp)
        .unwrap_or_else(|| panic!("bucket {} missing from {:?}", timestamp, counts));
    assert_eq!(
        bucket.count, expected,
        "bucket {} has count {}, expected {}",
        timestamp, bucket.count, expected
    );
}

/// Build a project id set
pub fn project_set(ids: &[ProjectId]) -> HashSet<ProjectId> {
    ids.iter().copied().collect()
}
