//! Error types for the collection containers
//!
//! This module defines all error types raised by the dictionary and list.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Soft lookups (`index_of`, `key_of`, `find`, `search`) never produce an
//! error; they return `Option` instead.

use crate::key::KeyError;
use crate::limits::LimitError;
use thiserror::Error;

/// Result type alias for container operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the collection containers
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Key failed validation on insertion (numeric or too long)
    #[error("Invalid key: {0}")]
    InvalidKey(#[from] KeyError),

    /// Insertion collided with an existing key
    #[error("Cannot duplicate a key entry: \"{0}\"")]
    DuplicateKey(String),

    /// Removal of a key that is not present
    #[error("Key not found: \"{0}\"")]
    KeyNotFound(String),

    /// Lookup by key or index that resolves to nothing
    #[error("Invalid offset: {0}")]
    OffsetNotFound(String),

    /// Integer identifier outside the live bounds
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: i64,
        /// Live length at the time of the request
        len: usize,
    },

    /// Unsupported element type tag
    #[error("Invalid element type: \"{0}\"")]
    InvalidType(String),

    /// Value type disagrees with the list restriction
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Element type of the list
        expected: &'static str,
        /// Runtime type of the rejected value
        actual: &'static str,
    },

    /// Casting is enabled but the conversion is disallowed
    #[error("Cannot cast {from} to {to}")]
    CastError {
        /// Runtime type of the source value
        from: &'static str,
        /// Target element type
        to: &'static str,
    },

    /// Value-based lookup found no match
    #[error("Value not found")]
    ValueNotFound,

    /// Argument of the wrong shape (e.g. a non-integer index)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed serialized input
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Binary encode/decode failure
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configured limit exceeded
    #[error("Limit exceeded: {0}")]
    LimitExceeded(#[from] LimitError),
}

impl Error {
    /// Stable snake_case identifier for the error kind
    pub fn reason_code(&self) -> &'static str {
        match self {
            Error::InvalidKey(_) => "invalid_key",
            Error::DuplicateKey(_) => "duplicate_key",
            Error::KeyNotFound(_) => "key_not_found",
            Error::OffsetNotFound(_) => "offset_not_found",
            Error::IndexOutOfRange { .. } => "index_out_of_range",
            Error::InvalidType(_) => "invalid_type",
            Error::TypeMismatch { .. } => "type_mismatch",
            Error::CastError { .. } => "cast_error",
            Error::ValueNotFound => "value_not_found",
            Error::InvalidArgument(_) => "invalid_argument",
            Error::ParseError(_) => "parse_error",
            Error::SerializationError(_) => "serialization_error",
            Error::LimitExceeded(_) => "limit_exceeded",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::ParseError(e.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
