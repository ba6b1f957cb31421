//! Error types for blockfilter.
//!
//! Filtering itself never fails: any attribute value produces a boolean.
//! The only fallible surface is loading configuration, which is what these
//! types describe.

use thiserror::Error;

/// Result type alias using BlockFilterError as the error type.
pub type Result<T> = std::result::Result<T, BlockFilterError>;

/// Top-level error type for blockfilter operations.
#[derive(Debug, Error)]
pub enum BlockFilterError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Configuration-related errors.
///
/// These errors occur when loading or parsing configuration files.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    /// Invalid configuration format
    #[error("Invalid configuration format: {reason}")]
    InvalidFormat { reason: String },
}

impl ConfigError {
    /// Creates a load failed error.
    pub fn load_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }
}
