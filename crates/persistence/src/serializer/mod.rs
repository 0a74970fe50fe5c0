//! Local serializer
//!
//! Translates the three kinds of locally persisted state between their
//! in-memory model and their storage records:
//!
//! - Remote documents: [`MaybeDocument`] ↔ [`PersistedMaybeDocument`]
//! - Pending writes: [`MutationBatch`] ↔ [`PersistedWriteBatch`]
//! - Listen targets: [`QueryData`] ↔ [`PersistedTarget`]
//!
//! Keys, values, timestamps, mutations and query shapes are delegated to a
//! [`PrimitiveCodec`]. This layer adds only the local bookkeeping around
//! them. The `*_to_bytes` / `*_from_bytes` helpers additionally wrap each
//! record in a checksummed frame (see [`crate::format`]).
//!
//! # Thread Safety
//!
//! The serializer holds only immutable state and is `Send + Sync` whenever
//! its codec is. Share one instance through an `Arc`.
//!
//! [`MaybeDocument`]: tessera_core::MaybeDocument
//! [`MutationBatch`]: tessera_core::MutationBatch
//! [`QueryData`]: tessera_core::QueryData
//! [`PersistedMaybeDocument`]: crate::records::PersistedMaybeDocument
//! [`PersistedWriteBatch`]: crate::records::PersistedWriteBatch
//! [`PersistedTarget`]: crate::records::PersistedTarget

mod maybe_document;
mod mutation_batch;
mod target;

use crate::config::{ConfigError, PersistenceConfig};
use crate::error::LocalSerializerError;
use crate::format::{self, PersistedRecord};
use tessera_remote::{PrimitiveCodec, RemoteSerializer};
use tracing::error;

/// Codec between the local model and storage records
#[derive(Debug, Clone)]
pub struct LocalSerializer<C = RemoteSerializer> {
    codec: C,
    verify_checksums: bool,
}

impl<C: PrimitiveCodec> LocalSerializer<C> {
    /// Wrap a primitive codec. Checksums are verified on read.
    pub fn new(codec: C) -> Self {
        LocalSerializer {
            codec,
            verify_checksums: true,
        }
    }

    /// Enable or disable checksum verification in `*_from_bytes`
    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// The primitive codec
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Whether `*_from_bytes` compares stored checksums
    pub fn verify_checksums(&self) -> bool {
        self.verify_checksums
    }

    fn write_frame<R: PersistedRecord>(&self, record: &R) -> Result<Vec<u8>, LocalSerializerError> {
        Ok(format::encode_record(record)?)
    }

    fn read_frame<R: PersistedRecord>(&self, bytes: &[u8]) -> Result<R, LocalSerializerError> {
        format::decode_single(bytes, self.verify_checksums).map_err(|e| {
            let kind = R::KIND;
            error!(%kind, len = bytes.len(), error = %e, "Corrupt persisted record");
            LocalSerializerError::Format(e)
        })
    }
}

impl LocalSerializer<RemoteSerializer> {
    /// Build a serializer for the configured database
    pub fn from_config(config: &PersistenceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(LocalSerializer::new(RemoteSerializer::new(config.database_id.clone()))
            .with_verify_checksums(config.verify_checksums))
    }
}
