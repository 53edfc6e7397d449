//! Error type shared by platform helpers.

use thiserror::Error;

/// Failure raised while preparing a service to run.
///
/// Everything here happens once at startup, so nothing is retryable: the
/// caller reports the error and exits.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Configuration value missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatformError {
    /// Create a configuration error with the given message.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_common::PlatformError;
    ///
    /// let err = PlatformError::config("PORT must be a number");
    /// assert_eq!(err.to_string(), "Configuration error: PORT must be a number");
    /// ```
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error with the given message.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
