//! Document snapshots and tombstones
//!
//! A [`MaybeDocument`] is what the local cache knows about one key: either
//! a concrete [`Document`] or a [`NoDocument`] tombstone recording that the
//! document did not exist at some version.

use crate::contract::SnapshotVersion;
use crate::key::DocumentKey;
use crate::value::ObjectValue;

/// Concrete document snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    key: DocumentKey,
    version: SnapshotVersion,
    data: ObjectValue,
    has_local_mutations: bool,
}

impl Document {
    /// Create a document snapshot
    pub fn new(
        key: DocumentKey,
        version: SnapshotVersion,
        data: ObjectValue,
        has_local_mutations: bool,
    ) -> Self {
        Document {
            key,
            version,
            data,
            has_local_mutations,
        }
    }

    /// Document key
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Server update time of this snapshot
    pub fn version(&self) -> SnapshotVersion {
        self.version
    }

    /// Field data
    pub fn data(&self) -> &ObjectValue {
        &self.data
    }

    /// Whether pending local writes are overlaid on this snapshot.
    ///
    /// Transient: computed by the layer that applies pending batches and
    /// never part of the persisted form.
    pub fn has_local_mutations(&self) -> bool {
        self.has_local_mutations
    }
}

/// Tombstone: the document did not exist as of `version`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoDocument {
    key: DocumentKey,
    version: SnapshotVersion,
}

impl NoDocument {
    /// Create a tombstone
    pub fn new(key: DocumentKey, version: SnapshotVersion) -> Self {
        NoDocument { key, version }
    }

    /// Document key
    pub fn key(&self) -> &DocumentKey {
        &self.key
    }

    /// Read time at which absence was observed
    pub fn version(&self) -> SnapshotVersion {
        self.version
    }
}

/// Either a document or a tombstone
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeDocument {
    /// Existing document
    Document(Document),
    /// Confirmed absence
    NoDocument(NoDocument),
}

impl MaybeDocument {
    /// Key of the document or tombstone
    pub fn key(&self) -> &DocumentKey {
        match self {
            MaybeDocument::Document(doc) => doc.key(),
            MaybeDocument::NoDocument(doc) => doc.key(),
        }
    }

    /// Version of the document or tombstone
    pub fn version(&self) -> SnapshotVersion {
        match self {
            MaybeDocument::Document(doc) => doc.version(),
            MaybeDocument::NoDocument(doc) => doc.version(),
        }
    }

    /// Variant name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            MaybeDocument::Document(_) => "Document",
            MaybeDocument::NoDocument(_) => "NoDocument",
        }
    }

    /// The document, if this is one
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            MaybeDocument::Document(doc) => Some(doc),
            MaybeDocument::NoDocument(_) => None,
        }
    }
}

impl From<Document> for MaybeDocument {
    fn from(doc: Document) -> Self {
        MaybeDocument::Document(doc)
    }
}

impl From<NoDocument> for MaybeDocument {
    fn from(doc: NoDocument) -> Self {
        MaybeDocument::NoDocument(doc)
    }
}
