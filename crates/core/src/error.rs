//! Error types for the Tessera model
//!
//! Model errors are raised when a value object is constructed from
//! input that violates its invariants (malformed paths, out-of-range
//! timestamps). We use `thiserror` for `Display` and `Error`.

use thiserror::Error;

/// Result type alias for model construction
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while constructing model values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Resource path contains an empty segment
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),

    /// Path does not address a document (odd segment count)
    #[error("Invalid document key: {0:?} must have an even number of segments")]
    InvalidDocumentKey(String),

    /// Field path is empty or has an empty segment
    #[error("Invalid field path: {0:?}")]
    InvalidFieldPath(String),

    /// Timestamp outside the representable range
    #[error("Timestamp out of range: seconds={seconds}, nanos={nanos}")]
    TimestampOutOfRange {
        /// Seconds since Unix epoch
        seconds: i64,
        /// Nanosecond fraction
        nanos: i32,
    },

    /// Project or database identifier is unusable
    #[error("Invalid database id: {0}")]
    InvalidDatabaseId(String),
}
