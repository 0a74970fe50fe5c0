//! Listen target bookkeeping
//!
//! [`QueryData`] is everything the client tracks about one active listen:
//! the query, its target id, the last acknowledged snapshot version, and
//! the resume token that lets the stream pick up where it left off.

use crate::contract::SnapshotVersion;
use crate::query::Query;
use serde::{Deserialize, Serialize};

/// Why a target is being listened to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryPurpose {
    /// Regular user listen
    Listen,
    /// Re-listen after an existence filter mismatch
    ExistenceFilterMismatch,
    /// Resolving a document in limbo
    LimboResolution,
}

impl std::fmt::Display for QueryPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            QueryPurpose::Listen => "LISTEN",
            QueryPurpose::ExistenceFilterMismatch => "EXISTENCE_FILTER_MISMATCH",
            QueryPurpose::LimboResolution => "LIMBO_RESOLUTION",
        };
        f.write_str(name)
    }
}

/// Bookkeeping for one listen target
#[derive(Debug, Clone, PartialEq)]
pub struct QueryData {
    query: Query,
    target_id: i32,
    sequence_number: i64,
    purpose: QueryPurpose,
    snapshot_version: SnapshotVersion,
    resume_token: Vec<u8>,
}

impl QueryData {
    /// Fresh target: no snapshot version, empty resume token
    pub fn new(query: Query, target_id: i32, sequence_number: i64, purpose: QueryPurpose) -> Self {
        QueryData {
            query,
            target_id,
            sequence_number,
            purpose,
            snapshot_version: SnapshotVersion::NONE,
            resume_token: Vec::new(),
        }
    }

    /// Copy with a new snapshot version and resume token
    pub fn with_resume_state(
        &self,
        snapshot_version: SnapshotVersion,
        resume_token: Vec<u8>,
    ) -> Self {
        QueryData {
            snapshot_version,
            resume_token,
            ..self.clone()
        }
    }

    /// Copy with a new sequence number
    pub fn with_sequence_number(&self, sequence_number: i64) -> Self {
        QueryData {
            sequence_number,
            ..self.clone()
        }
    }

    /// Copy with a new purpose
    pub fn with_purpose(&self, purpose: QueryPurpose) -> Self {
        QueryData {
            purpose,
            ..self.clone()
        }
    }

    /// The listened query
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Target id, unique per active listen
    pub fn target_id(&self) -> i32 {
        self.target_id
    }

    /// Cache eviction sequence number
    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    /// Listen purpose
    pub fn purpose(&self) -> QueryPurpose {
        self.purpose
    }

    /// Last acknowledged snapshot version
    pub fn snapshot_version(&self) -> SnapshotVersion {
        self.snapshot_version
    }

    /// Opaque server resume token
    pub fn resume_token(&self) -> &[u8] {
        &self.resume_token
    }
}
