//! Mutations and mutation batches
//!
//! A [`MutationBatch`] is the unit of the local write queue: one enqueue of
//! user writes, sharing a batch id and a local write time. Mutations inside
//! a batch apply in order.

use crate::contract::{SnapshotVersion, Timestamp};
use crate::key::{DocumentKey, FieldPath};
use crate::value::ObjectValue;
use std::collections::BTreeSet;

/// Batch id of a batch that has not been assigned one yet
pub const BATCH_ID_UNKNOWN: i32 = -1;

/// Condition the remote document must satisfy for a write to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precondition {
    /// No condition
    #[default]
    None,
    /// Document must (or must not) exist
    Exists(bool),
    /// Document must have exactly this update time
    UpdateTime(SnapshotVersion),
}

impl Precondition {
    /// True for `Precondition::None`
    pub fn is_none(&self) -> bool {
        matches!(self, Precondition::None)
    }
}

/// Single write to a single document
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Overwrite the whole document
    Set {
        /// Target document
        key: DocumentKey,
        /// New contents
        value: ObjectValue,
        /// Write condition
        precondition: Precondition,
    },

    /// Update only the fields named in `mask`
    Patch {
        /// Target document
        key: DocumentKey,
        /// Values for masked fields; masked fields absent here are deleted
        value: ObjectValue,
        /// Fields touched by this patch
        mask: BTreeSet<FieldPath>,
        /// Write condition
        precondition: Precondition,
    },

    /// Delete the document
    Delete {
        /// Target document
        key: DocumentKey,
        /// Write condition
        precondition: Precondition,
    },
}

impl Mutation {
    /// Unconditional set
    pub fn set(key: DocumentKey, value: ObjectValue) -> Self {
        Mutation::Set {
            key,
            value,
            precondition: Precondition::None,
        }
    }

    /// Patch that requires the document to exist
    pub fn patch(key: DocumentKey, value: ObjectValue, mask: BTreeSet<FieldPath>) -> Self {
        Mutation::Patch {
            key,
            value,
            mask,
            precondition: Precondition::Exists(true),
        }
    }

    /// Unconditional delete
    pub fn delete(key: DocumentKey) -> Self {
        Mutation::Delete {
            key,
            precondition: Precondition::None,
        }
    }

    /// Get the document key this mutation writes
    pub fn key(&self) -> &DocumentKey {
        match self {
            Mutation::Set { key, .. } => key,
            Mutation::Patch { key, .. } => key,
            Mutation::Delete { key, .. } => key,
        }
    }

    /// Get the write condition
    pub fn precondition(&self) -> Precondition {
        match self {
            Mutation::Set { precondition, .. } => *precondition,
            Mutation::Patch { precondition, .. } => *precondition,
            Mutation::Delete { precondition, .. } => *precondition,
        }
    }
}

/// Ordered group of pending local writes
#[derive(Debug, Clone, PartialEq)]
pub struct MutationBatch {
    batch_id: i32,
    local_write_time: Timestamp,
    mutations: Vec<Mutation>,
}

impl MutationBatch {
    /// Create a batch. Mutation order is preserved as given.
    pub fn new(batch_id: i32, local_write_time: Timestamp, mutations: Vec<Mutation>) -> Self {
        MutationBatch {
            batch_id,
            local_write_time,
            mutations,
        }
    }

    /// Locally unique batch identifier
    pub fn batch_id(&self) -> i32 {
        self.batch_id
    }

    /// Client clock reading at enqueue time
    pub fn local_write_time(&self) -> Timestamp {
        self.local_write_time
    }

    /// Mutations in application order
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Distinct keys written by this batch
    pub fn keys(&self) -> BTreeSet<DocumentKey> {
        self.mutations.iter().map(|m| m.key().clone()).collect()
    }

    /// True when the batch holds no mutations
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}
