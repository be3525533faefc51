//! Error types for reasongraph.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`ParseError`]: Transcript parsing errors
//! - [`ConfigError`]: Configuration errors
//!
//! Missing tags are never errors: an absent block simply parses to `None`
//! or an empty list. Only unparsable numeric attributes fail a parse.
//!
//! All errors implement `Send + Sync`.

use thiserror::Error;

/// Top-level application error.
///
/// This is the main error type returned by the binary and the
/// visualization boundary. It wraps all subsystem errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Transcript parsing error.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the transcript failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Transcript parsing errors.
///
/// A parse error means the whole transcript is rejected for visualization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A numeric attribute could not be parsed.
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber {
        /// The attribute or block the number came from.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// An unknown reasoning method identifier.
    #[error("Unknown reasoning method: '{input}'")]
    UnknownMethod {
        /// The identifier that was not recognized.
        input: String,
    },
}

impl ParseError {
    /// Create an [`ParseError::InvalidNumber`] for a field.
    #[must_use]
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
