//! Helper functions for creating and classifying errors

use super::types::MetricsError;

impl MetricsError {
    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn store_unavailable<S: Into<String>>(message: S) -> Self {
        Self::StoreUnavailable(message.into())
    }

    /// Errors that are fatal at startup and must not be retried
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_) | Self::Config(_) | Self::Yaml(_)
        )
    }

    /// Errors raised by a call to the backing store
    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Redis(_) | Self::StoreUnavailable(_))
    }
}
