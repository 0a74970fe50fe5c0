//! Local persistence codec for Tessera
//!
//! Converts cached remote documents, pending mutation batches and listen
//! targets to the records stored on disk, and back:
//! - serializer: LocalSerializer, the record codec
//! - records: persisted record types
//! - format: checksummed framing of records as bytes
//! - config: PersistenceConfig
//! - error: LocalSerializerError
//!
//! Keys, values and query shapes are delegated to a
//! [`tessera_remote::PrimitiveCodec`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod format;
pub mod records;
pub mod serializer;

pub use config::{ConfigError, PersistenceConfig};
pub use error::LocalSerializerError;
pub use format::{FormatError, RecordKind};
pub use records::{
    PersistedDocumentType, PersistedMaybeDocument, PersistedNoDocument, PersistedTarget,
    PersistedWriteBatch, TargetType,
};
pub use serializer::LocalSerializer;
