//! Remote document records

use super::LocalSerializer;
use crate::error::LocalSerializerError;
use crate::records::{PersistedDocumentType, PersistedMaybeDocument, PersistedNoDocument};
use tessera_core::{Document, MaybeDocument, NoDocument, SnapshotVersion};
use tessera_remote::{wire, PrimitiveCodec};
use tracing::{error, trace};

impl<C: PrimitiveCodec> LocalSerializer<C> {
    /// Encode a cached document or tombstone.
    ///
    /// A document's local-mutation flag is not persisted.
    pub fn encode_maybe_document(&self, document: &MaybeDocument) -> PersistedMaybeDocument {
        let document_type = match document {
            MaybeDocument::Document(doc) => {
                PersistedDocumentType::Document(self.encode_document(doc))
            }
            MaybeDocument::NoDocument(no_doc) => {
                PersistedDocumentType::NoDocument(self.encode_no_document(no_doc))
            }
        };
        trace!(key = %document.key(), kind = document.type_name(), "Encoded remote document");
        PersistedMaybeDocument {
            document_type: Some(document_type),
        }
    }

    /// Decode a cached document or tombstone.
    ///
    /// Decoded documents never carry local mutations.
    pub fn decode_maybe_document(
        &self,
        record: &PersistedMaybeDocument,
    ) -> Result<MaybeDocument, LocalSerializerError> {
        let document = match &record.document_type {
            Some(PersistedDocumentType::Document(doc)) => {
                MaybeDocument::Document(self.decode_document(doc)?)
            }
            Some(PersistedDocumentType::NoDocument(no_doc)) => {
                MaybeDocument::NoDocument(self.decode_no_document(no_doc)?)
            }
            None => {
                let rendered = format!("{:?}", record);
                error!(record = %rendered, "Unknown MaybeDocument");
                return Err(LocalSerializerError::UnknownDocumentType(rendered));
            }
        };
        trace!(key = %document.key(), kind = document.type_name(), "Decoded remote document");
        Ok(document)
    }

    /// Encode and frame a cached document
    pub fn maybe_document_to_bytes(
        &self,
        document: &MaybeDocument,
    ) -> Result<Vec<u8>, LocalSerializerError> {
        self.write_frame(&self.encode_maybe_document(document))
    }

    /// Unframe and decode a cached document
    pub fn maybe_document_from_bytes(
        &self,
        bytes: &[u8],
    ) -> Result<MaybeDocument, LocalSerializerError> {
        let record: PersistedMaybeDocument = self.read_frame(bytes)?;
        self.decode_maybe_document(&record)
    }

    fn encode_document(&self, doc: &Document) -> wire::Document {
        wire::Document {
            name: self.codec.encode_key(doc.key()),
            fields: self.codec.encode_fields(doc.data()),
            update_time: Some(self.codec.encode_version(&doc.version())),
        }
    }

    fn decode_document(&self, doc: &wire::Document) -> Result<Document, LocalSerializerError> {
        let key = self.codec.decode_key(&doc.name)?;
        let data = self.codec.decode_fields(&doc.fields)?;
        let version = self.decode_optional_version(doc.update_time.as_ref())?;
        Ok(Document::new(key, version, data, false))
    }

    fn encode_no_document(&self, no_doc: &NoDocument) -> PersistedNoDocument {
        PersistedNoDocument {
            name: self.codec.encode_key(no_doc.key()),
            read_time: Some(self.codec.encode_version(&no_doc.version())),
        }
    }

    fn decode_no_document(
        &self,
        no_doc: &PersistedNoDocument,
    ) -> Result<NoDocument, LocalSerializerError> {
        let key = self.codec.decode_key(&no_doc.name)?;
        let version = self.decode_optional_version(no_doc.read_time.as_ref())?;
        Ok(NoDocument::new(key, version))
    }

    // Absent timestamps read back as the NONE version
    pub(super) fn decode_optional_version(
        &self,
        timestamp: Option<&wire::Timestamp>,
    ) -> Result<SnapshotVersion, LocalSerializerError> {
        match timestamp {
            Some(ts) => Ok(self.codec.decode_version(ts)?),
            None => Ok(SnapshotVersion::NONE),
        }
    }
}
