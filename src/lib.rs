//! Tessera - local persistence codec for an offline-first document client
//!
//! Tessera converts the client's cached state into storage records and
//! back: remote documents and tombstones, pending write batches, and
//! listen targets with their resume state.
//!
//! # Quick Start
//!
//! ```
//! use tessera::{DatabaseId, DocumentKey, LocalSerializer, MaybeDocument, NoDocument,
//!     PersistenceConfig, SnapshotVersion, Timestamp};
//!
//! let config = PersistenceConfig::for_database(DatabaseId::for_project("demo"));
//! let serializer = LocalSerializer::from_config(&config).unwrap();
//!
//! let key = DocumentKey::from_path_string("col/doc1").unwrap();
//! let tombstone: MaybeDocument =
//!     NoDocument::new(key, SnapshotVersion::new(Timestamp::from_secs(5))).into();
//!
//! let bytes = serializer.maybe_document_to_bytes(&tombstone).unwrap();
//! assert_eq!(serializer.maybe_document_from_bytes(&bytes).unwrap(), tombstone);
//! ```
//!
//! # Architecture
//!
//! - `tessera-core`: the in-memory model
//! - `tessera-remote`: wire messages and the [`PrimitiveCodec`] for keys,
//!   values, mutations and query shapes
//! - `tessera-persistence`: the [`LocalSerializer`] and record framing

pub use tessera_core::*;
pub use tessera_persistence::{
    format, records, ConfigError, FormatError, LocalSerializer, LocalSerializerError,
    PersistenceConfig, RecordKind,
};
pub use tessera_remote::{wire, PrimitiveCodec, RemoteSerializer, WireError};
