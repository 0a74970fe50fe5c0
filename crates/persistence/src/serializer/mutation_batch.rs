//! Mutation queue records

use super::LocalSerializer;
use crate::error::LocalSerializerError;
use crate::records::PersistedWriteBatch;
use tessera_core::{MutationBatch, Timestamp};
use tessera_remote::PrimitiveCodec;
use tracing::trace;

impl<C: PrimitiveCodec> LocalSerializer<C> {
    /// Encode a pending batch. Writes keep their order.
    pub fn encode_mutation_batch(&self, batch: &MutationBatch) -> PersistedWriteBatch {
        trace!(
            batch_id = batch.batch_id(),
            writes = batch.mutations().len(),
            "Encoding mutation batch"
        );
        PersistedWriteBatch {
            batch_id: batch.batch_id(),
            local_write_time: Some(self.codec.encode_timestamp(&batch.local_write_time())),
            writes: batch
                .mutations()
                .iter()
                .map(|m| self.codec.encode_mutation(m))
                .collect(),
        }
    }

    /// Decode a pending batch
    pub fn decode_mutation_batch(
        &self,
        batch: &PersistedWriteBatch,
    ) -> Result<MutationBatch, LocalSerializerError> {
        let local_write_time = match &batch.local_write_time {
            Some(ts) => self.codec.decode_timestamp(ts)?,
            None => Timestamp::EPOCH,
        };
        let mutations = batch
            .writes
            .iter()
            .map(|w| self.codec.decode_mutation(w))
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            batch_id = batch.batch_id,
            writes = mutations.len(),
            "Decoded mutation batch"
        );
        Ok(MutationBatch::new(batch.batch_id, local_write_time, mutations))
    }

    /// Encode and frame a pending batch
    pub fn mutation_batch_to_bytes(
        &self,
        batch: &MutationBatch,
    ) -> Result<Vec<u8>, LocalSerializerError> {
        self.write_frame(&self.encode_mutation_batch(batch))
    }

    /// Unframe and decode a pending batch
    pub fn mutation_batch_from_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<MutationBatch, LocalSerializerError> {
        let record: PersistedWriteBatch = self.read_frame(bytes)?;
        self.decode_mutation_batch(&record)
    }
}
