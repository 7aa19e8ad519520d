//! Logging setup
//!
//! Installs the global `tracing` subscriber from the `logging` config section.
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::{LogFormat, LoggingConfig};
use crate::utils::error::{MetricsError, Result};
use tracing_subscriber::EnvFilter;

/// Build the filter used by [`init_logging`]
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| MetricsError::config(format!("Invalid log level '{}': {}", config.level, e))),
    }
}

/// Install the global subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|e| MetricsError::config(format!("Failed to install logger: {}", e)))
}
