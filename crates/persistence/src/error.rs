//! Local serializer errors
//!
//! Every variant is fatal to the caller: a record that cannot be encoded
//! or decoded means the local cache is inconsistent. None is retried.

use crate::format::FormatError;
use tessera_core::QueryPurpose;
use tessera_remote::WireError;

/// Errors raised by the local serializer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocalSerializerError {
    /// Only listen targets are persisted
    #[error("Only queries with purpose LISTEN may be stored, target {target_id} has {purpose}")]
    NonPersistablePurpose {
        /// Target being encoded
        target_id: i32,
        /// Its purpose
        purpose: QueryPurpose,
    },

    /// Stored document record has no document type
    #[error("Unknown MaybeDocument {0}")]
    UnknownDocumentType(String),

    /// Stored target has neither a documents nor a query definition
    #[error("Unknown targetType for target {target_id}")]
    UnknownTargetType {
        /// Target being decoded
        target_id: i32,
    },

    /// Primitive codec rejected a component
    #[error("Wire error: {0}")]
    Wire(#[from] WireError),

    /// Record framing is corrupt
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
}

impl LocalSerializerError {
    /// Raised on encode when the caller broke a precondition
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, LocalSerializerError::NonPersistablePurpose { .. })
    }

    /// Raised on decode when stored bytes are unreadable
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            LocalSerializerError::UnknownDocumentType(_)
                | LocalSerializerError::UnknownTargetType { .. }
                | LocalSerializerError::Format(_)
        )
    }
}
