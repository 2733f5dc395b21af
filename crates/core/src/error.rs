//! Error types for Strata CDC
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The transaction state machine itself never fails; errors only come from
//! the serialization boundary (decoding offset records), identifier
//! validation, and configuration loading.

use std::io;
use thiserror::Error;

/// Result type alias for Strata CDC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Strata CDC
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An offset entry holds a value of the wrong type
    #[error("Offset type mismatch for key '{key}': expected {expected}, got {actual}")]
    OffsetTypeMismatch {
        /// Offending offset key
        key: String,
        /// Type the key requires
        expected: &'static str,
        /// Type actually found
        actual: &'static str,
    },

    /// An event count in an offset record is outside the unsigned range
    #[error("Offset count out of range for key '{key}': {value}")]
    CountOutOfRange {
        /// Offending offset key
        key: String,
        /// Stored value
        value: i64,
    },

    /// A source name or object identity contains the reserved key separator
    #[error("Invalid {field} '{value}': must not contain separator '{separator}'")]
    InvalidIdentifier {
        /// Which identifier was rejected ("source name" or "object identity")
        field: &'static str,
        /// The rejected value
        value: String,
        /// Reserved separator
        separator: String,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
