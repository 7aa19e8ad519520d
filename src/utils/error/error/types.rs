//! Error types for the realtime metrics store

use thiserror::Error;

/// Result type alias for the realtime metrics store
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Main error type for the realtime metrics store
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Bucket sizes or TTLs that cannot describe a time window
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration that could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Redis errors
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
