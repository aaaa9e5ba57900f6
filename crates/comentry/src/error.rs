//! comentry error types

use thiserror::Error;

/// Result type for decoding entries
pub type Result<T> = std::result::Result<T, CodecError>;

/// Malformed attribute input. Absent attributes are never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Attribute present but not a GUID
    #[error("attribute '{key}' is not a GUID: '{value}'")]
    InvalidGuid { key: String, value: String },

    /// Attribute present but not an unsigned integer
    #[error("attribute '{key}' is not an integer: '{value}'")]
    InvalidInteger { key: String, value: String },
}
