//! Codec Capability Tests
//!
//! The local serializer only reaches keys, values and query shapes through
//! the `PrimitiveCodec` it was built with. A codec with a different key
//! format must round trip every record kind.

use crate::common::*;
use tessera::records::PersistedDocumentType;

#[test]
fn documents_use_the_supplied_key_format() {
    let s = LocalSerializer::new(CountingCodec::new());
    let record = s.encode_maybe_document(&tombstone("col/doc1"));

    match &record.document_type {
        Some(PersistedDocumentType::NoDocument(no_doc)) => assert_eq!(no_doc.name, "fake:col/doc1"),
        other => panic!("Expected tombstone, got {:?}", other),
    }
    assert!(s.codec().calls() > 0);
}

#[test]
fn every_record_kind_round_trips_through_fake_codec() {
    let s = LocalSerializer::new(CountingCodec::new());

    let doc = document("rooms/eros", false);
    assert_eq!(
        s.maybe_document_from_bytes(&s.maybe_document_to_bytes(&doc).unwrap())
            .unwrap(),
        doc
    );

    let batch = sample_batch(4);
    assert_eq!(
        s.mutation_batch_from_bytes(&s.mutation_batch_to_bytes(&batch).unwrap())
            .unwrap(),
        batch
    );

    let target = listen_target(8, collection_query());
    assert_eq!(
        s.query_data_from_bytes(&s.query_data_to_bytes(&target).unwrap())
            .unwrap(),
        target
    );
}

#[test]
fn records_are_not_portable_between_key_formats() {
    let fake = LocalSerializer::new(CountingCodec::new());
    let real = serializer();

    let bytes = fake.maybe_document_to_bytes(&tombstone("a/b")).unwrap();
    assert!(matches!(
        real.maybe_document_from_bytes(&bytes),
        Err(LocalSerializerError::Wire(WireError::InvalidResourceName(_)))
    ));
}

#[test]
fn serializer_accepts_boxed_codec() {
    let codec: Box<dyn PrimitiveCodec> = Box::new(RemoteSerializer::new(test_database()));
    let s = LocalSerializer::new(BoxedCodec(codec));
    let doc = tombstone("a/b");
    assert_eq!(
        s.decode_maybe_document(&s.encode_maybe_document(&doc))
            .unwrap(),
        doc
    );
}

/// Forwards to a trait object chosen at runtime.
struct BoxedCodec(Box<dyn PrimitiveCodec>);

impl PrimitiveCodec for BoxedCodec {
    fn encode_key(&self, key: &DocumentKey) -> String {
        self.0.encode_key(key)
    }
    fn decode_key(&self, name: &str) -> Result<DocumentKey, WireError> {
        self.0.decode_key(name)
    }
    fn encode_value(&self, value: &FieldValue) -> wire::Value {
        self.0.encode_value(value)
    }
    fn decode_value(&self, value: &wire::Value) -> Result<FieldValue, WireError> {
        self.0.decode_value(value)
    }
    fn encode_timestamp(&self, timestamp: &Timestamp) -> wire::Timestamp {
        self.0.encode_timestamp(timestamp)
    }
    fn decode_timestamp(&self, timestamp: &wire::Timestamp) -> Result<Timestamp, WireError> {
        self.0.decode_timestamp(timestamp)
    }
    fn encode_mutation(&self, mutation: &Mutation) -> wire::Write {
        self.0.encode_mutation(mutation)
    }
    fn decode_mutation(&self, write: &wire::Write) -> Result<Mutation, WireError> {
        self.0.decode_mutation(write)
    }
    fn encode_documents_target(&self, query: &Query) -> wire::DocumentsTarget {
        self.0.encode_documents_target(query)
    }
    fn decode_documents_target(&self, target: &wire::DocumentsTarget) -> Result<Query, WireError> {
        self.0.decode_documents_target(target)
    }
    fn encode_query_target(&self, query: &Query) -> Result<wire::QueryTarget, WireError> {
        self.0.encode_query_target(query)
    }
    fn decode_query_target(&self, target: &wire::QueryTarget) -> Result<Query, WireError> {
        self.0.decode_query_target(target)
    }
}
