//! Persisted record types
//!
//! The shapes written to local storage. Each one embeds wire messages
//! produced by the primitive codec; the only local-only data is the
//! bookkeeping the network never sees (read times of missing documents,
//! batch ids, resume tokens, sequence numbers).
//!
//! The oneof fields are `Option`s: a record read back from storage may
//! carry no discriminant at all, and the local serializer rejects it.

use serde::{Deserialize, Serialize};
use tessera_remote::wire;

// ============================================================================
// Remote documents
// ============================================================================

/// Cached remote document state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedMaybeDocument {
    /// Which kind of document is stored; `None` only in corrupt records
    pub document_type: Option<PersistedDocumentType>,
}

/// Discriminant of [`PersistedMaybeDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PersistedDocumentType {
    /// An existing document with its update time
    Document(wire::Document),
    /// A confirmed absence
    NoDocument(PersistedNoDocument),
}

/// Confirmed absence of a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedNoDocument {
    /// Resource name of the missing document
    pub name: String,
    /// Version at which the absence was observed
    pub read_time: Option<wire::Timestamp>,
}

// ============================================================================
// Mutation queue
// ============================================================================

/// Pending local write batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedWriteBatch {
    /// Batch id assigned by the mutation queue
    pub batch_id: i32,
    /// Local time the batch was committed
    pub local_write_time: Option<wire::Timestamp>,
    /// Writes in application order
    pub writes: Vec<wire::Write>,
}

// ============================================================================
// Query cache
// ============================================================================

/// Listen target with its resume state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedTarget {
    /// Target id
    pub target_id: i32,
    /// Last snapshot version the target was consistent at
    pub snapshot_version: Option<wire::Timestamp>,
    /// Opaque resume token
    #[serde(with = "serde_bytes")]
    pub resume_token: Vec<u8>,
    /// Sequence number of the last listen
    pub last_listen_sequence_number: i64,
    /// Target definition; `None` only in corrupt records
    pub target_type: Option<TargetType>,
}

/// Discriminant of [`PersistedTarget`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetType {
    /// Single document lookup
    Documents(wire::DocumentsTarget),
    /// Structured query
    Query(wire::QueryTarget),
}
