//! Error types for failover-core
//!
//! These cover configuration problems only. Failures of caller-supplied
//! operations keep their own error type and pass through the retry and flow
//! layers unchanged.

use thiserror::Error;

/// Result type alias using failover-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration errors for failover
#[derive(Error, Debug)]
pub enum Error {
    /// A retry policy that would never run its operation
    #[error("Invalid retry configuration: max-attempts must be at least 1")]
    ZeroAttempts,

    /// Backoff bounds out of order
    #[error("Invalid retry configuration: min-delay {min_ms}ms exceeds max-delay {max_ms}ms")]
    DelayBoundsInverted { min_ms: u64, max_ms: u64 },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration format
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Field-level validation failures, one per line
    #[error("Configuration validation failed:\n{errors}")]
    Validation { errors: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a validation error from a list of field errors
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation {
            errors: errors.join("\n"),
        }
    }
}
