//! Redis storage implementation
//!
//! This module provides Redis connectivity and the key operations the
//! realtime metrics store is built on.
//!
//! ## Module Structure
//!
//! - `pool` - Connection sharing and health checks
//! - `cache` - Single-key reads and keyspace scans
//! - `atomic` - Counter increments with sliding expiry
//! - `hash` - Hash increments and reads
//! - `batch` - Multi-key reads
//! - `collections` - Set operations
//! - `tests` - Module tests

mod atomic;
mod batch;
mod cache;
mod collections;
mod hash;
mod pool;

pub use pool::{RedisConnection, RedisPool};
