//! # realtime-metrics
//!
//! Realtime load classification for an event ingestion pipeline.
//!
//! Every processed event is counted into fixed-width, self-expiring time
//! buckets per project, together with a histogram of its processing duration.
//! A separate decision process reads those counters and moves projects into
//! and out of the low priority queue (LPQ); the ingestion pipeline consults
//! the LPQ to route each event.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use realtime_metrics::{
//!     Config, ProcessingQueue, RealtimeMetricsStore, RedisPool, RedisRealtimeMetricsStore,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/realtime_metrics.yaml").await?;
//!     let pool = Arc::new(RedisPool::new(&config.redis).await?);
//!     let store = RedisRealtimeMetricsStore::new(pool, &config.realtime_metrics)?;
//!
//!     store.record_event(42, 1_700_000_005).await?;
//!     store.record_duration(42, 1_700_000_005, 23).await?;
//!
//!     if store.queue_for(42).await? == ProcessingQueue::LowPriority {
//!         println!("project 42 is throttled");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::realtime_metrics::{
    BucketLayout, BucketSize, BucketedCount, BucketedDurations, InMemoryRealtimeMetricsStore,
    KEY_PREFIX, ProcessingQueue, ProjectId, RealtimeMetricsStore, RedisRealtimeMetricsStore,
};
pub use storage::redis::RedisPool;
pub use utils::error::{MetricsError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the UNIX epoch at build time
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
