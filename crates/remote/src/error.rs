//! Primitive codec errors.

use tessera_core::ModelError;

/// Errors raised while decoding wire messages into model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Resource name is not `projects/{p}/databases/{d}/documents[/...]`
    #[error("Invalid resource name: {0}")]
    InvalidResourceName(String),

    /// Resource name belongs to a different database
    #[error("Database mismatch: expected {expected}, got {actual}")]
    DatabaseMismatch {
        /// Database this codec is bound to
        expected: String,
        /// Database named in the input
        actual: String,
    },

    /// Required oneof or message field is unset
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Target shape the model cannot express
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Query shape the wire format cannot express
    #[error("Unsupported query: {0}")]
    UnsupportedQuery(String),

    /// Decoded data violates a model invariant
    #[error(transparent)]
    Model(#[from] ModelError),
}
