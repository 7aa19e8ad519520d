//! Error handling for the realtime metrics store
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{MetricsError, Result};
