//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod logging;
pub mod metrics;
pub mod storage;

// Re-export all configuration types
pub use logging::*;
pub use metrics::*;
pub use storage::*;

pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_counter_bucket_size() -> i64 {
    10
}

pub fn default_counter_ttl_ms() -> u64 {
    120_000 // 2 minutes
}

pub fn default_histogram_bucket_size() -> i64 {
    10
}

pub fn default_histogram_ttl_ms() -> u64 {
    180_000 // 3 minutes
}

pub fn default_log_level() -> String {
    "info".to_string()
}
