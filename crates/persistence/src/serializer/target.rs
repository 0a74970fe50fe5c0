//! Query cache records
//!
//! Only targets with purpose `LISTEN` are persisted. Limbo resolution and
//! existence-filter targets are transient, so a stored target always
//! decodes back as a listen target.

use super::LocalSerializer;
use crate::error::LocalSerializerError;
use crate::records::{PersistedTarget, TargetType};
use tessera_core::{QueryData, QueryPurpose};
use tessera_remote::PrimitiveCodec;
use tracing::{error, trace};

impl<C: PrimitiveCodec> LocalSerializer<C> {
    /// Encode a listen target.
    ///
    /// Fails without producing a record if the purpose is not `LISTEN`.
    pub fn encode_query_data(
        &self,
        query_data: &QueryData,
    ) -> Result<PersistedTarget, LocalSerializerError> {
        let target_id = query_data.target_id();
        let purpose = query_data.purpose();
        if purpose != QueryPurpose::Listen {
            error!(target_id, %purpose, "Refusing to persist non-listen target");
            return Err(LocalSerializerError::NonPersistablePurpose { target_id, purpose });
        }

        let query = query_data.query();
        let target_type = if self.codec.is_document_query(query) {
            TargetType::Documents(self.codec.encode_documents_target(query))
        } else {
            TargetType::Query(self.codec.encode_query_target(query)?)
        };

        trace!(
            target_id,
            sequence_number = query_data.sequence_number(),
            "Encoded target"
        );
        Ok(PersistedTarget {
            target_id,
            snapshot_version: Some(self.codec.encode_version(&query_data.snapshot_version())),
            resume_token: query_data.resume_token().to_vec(),
            last_listen_sequence_number: query_data.sequence_number(),
            target_type: Some(target_type),
        })
    }

    /// Decode a stored target. The result always has purpose `LISTEN`.
    pub fn decode_query_data(
        &self,
        target: &PersistedTarget,
    ) -> Result<QueryData, LocalSerializerError> {
        let target_id = target.target_id;
        let version = self.decode_optional_version(target.snapshot_version.as_ref())?;

        let query = match &target.target_type {
            Some(TargetType::Documents(documents)) => {
                self.codec.decode_documents_target(documents)?
            }
            Some(TargetType::Query(query)) => self.codec.decode_query_target(query)?,
            None => {
                error!(target_id, "Unknown targetType");
                return Err(LocalSerializerError::UnknownTargetType { target_id });
            }
        };

        trace!(
            target_id,
            sequence_number = target.last_listen_sequence_number,
            "Decoded target"
        );
        Ok(QueryData::new(
            query,
            target_id,
            target.last_listen_sequence_number,
            QueryPurpose::Listen,
        )
        .with_resume_state(version, target.resume_token.clone()))
    }

    /// Encode and frame a listen target
    pub fn query_data_to_bytes(
        &self,
        query_data: &QueryData,
    ) -> Result<Vec<u8>, LocalSerializerError> {
        self.write_frame(&self.encode_query_data(query_data)?)
    }

    /// Unframe and decode a stored target
    pub fn query_data_from_bytes(&self, bytes: &[u8]) -> Result<QueryData, LocalSerializerError> {
        let record: PersistedTarget = self.read_frame(bytes)?;
        self.decode_query_data(&record)
    }
}
