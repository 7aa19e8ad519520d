//! Utility modules
//!
//! - **error**: Error type and result alias
//! - **logging**: Subscriber setup

pub mod error;
pub mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
