//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `storage_validators`: Redis connection settings
//! - `metrics_validators`: Bucket layout and logging settings
//! - `tests`: Test suite for all validators

mod metrics_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
