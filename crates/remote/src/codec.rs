//! Primitive codec trait definition.

use crate::error::WireError;
use crate::wire;
use std::collections::BTreeMap;
use tessera_core::{
    DocumentKey, FieldValue, Mutation, ObjectValue, Query, SnapshotVersion, Timestamp,
};

/// Primitive codec trait.
///
/// Converts the building blocks of the document model (keys, values,
/// timestamps, mutations, query shapes) to and from wire messages. Both the
/// network layer and the local persistence layer compose records out of
/// these primitives, so they share one implementation.
///
/// Encoding is infallible for valid model values; decoding validates its
/// input and returns [`WireError`] on malformed or foreign data.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync`: they hold only immutable configuration
/// and may be shared across threads.
///
/// # Provided Methods
///
/// Field maps, snapshot versions and query classification have default
/// implementations built on the required methods. A fake codec for tests
/// only needs the primitives.
pub trait PrimitiveCodec: Send + Sync {
    /// Encode a document key as a resource name.
    fn encode_key(&self, key: &DocumentKey) -> String;

    /// Decode a resource name into a document key.
    fn decode_key(&self, name: &str) -> Result<DocumentKey, WireError>;

    /// Encode a single field value.
    fn encode_value(&self, value: &FieldValue) -> wire::Value;

    /// Decode a single field value.
    fn decode_value(&self, value: &wire::Value) -> Result<FieldValue, WireError>;

    /// Encode a timestamp.
    fn encode_timestamp(&self, timestamp: &Timestamp) -> wire::Timestamp;

    /// Decode and validate a timestamp.
    fn decode_timestamp(&self, timestamp: &wire::Timestamp) -> Result<Timestamp, WireError>;

    /// Encode a single mutation.
    fn encode_mutation(&self, mutation: &Mutation) -> wire::Write;

    /// Decode a single mutation.
    fn decode_mutation(&self, write: &wire::Write) -> Result<Mutation, WireError>;

    /// Encode a document-key query as its minimal wire shape.
    fn encode_documents_target(&self, query: &Query) -> wire::DocumentsTarget;

    /// Decode a documents target into a document-key query.
    fn decode_documents_target(&self, target: &wire::DocumentsTarget) -> Result<Query, WireError>;

    /// Encode a structured query.
    ///
    /// Fails for query shapes the wire format cannot express.
    fn encode_query_target(&self, query: &Query) -> Result<wire::QueryTarget, WireError>;

    /// Decode a structured query.
    fn decode_query_target(&self, target: &wire::QueryTarget) -> Result<Query, WireError>;

    /// Encode every top-level field of an object.
    fn encode_fields(&self, value: &ObjectValue) -> BTreeMap<String, wire::Value> {
        value
            .iter()
            .map(|(name, v)| (name.clone(), self.encode_value(v)))
            .collect()
    }

    /// Decode a field map into object data.
    fn decode_fields(
        &self,
        fields: &BTreeMap<String, wire::Value>,
    ) -> Result<ObjectValue, WireError> {
        fields
            .iter()
            .map(|(name, v)| Ok((name.clone(), self.decode_value(v)?)))
            .collect::<Result<BTreeMap<_, _>, WireError>>()
            .map(ObjectValue::from_map)
    }

    /// Encode a snapshot version.
    fn encode_version(&self, version: &SnapshotVersion) -> wire::Timestamp {
        self.encode_timestamp(&version.timestamp())
    }

    /// Decode a snapshot version.
    fn decode_version(&self, timestamp: &wire::Timestamp) -> Result<SnapshotVersion, WireError> {
        self.decode_timestamp(timestamp).map(SnapshotVersion::new)
    }

    /// True if `query` persists as a documents target.
    fn is_document_query(&self, query: &Query) -> bool {
        query.is_document_query()
    }
}
