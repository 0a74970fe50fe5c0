//! Remote Document Tests
//!
//! Documents and tombstones through the record codec:
//! - Round trips keep key, version and data
//! - The local-mutation flag is dropped
//! - Tombstones store name and read time only

use crate::common::*;
use tessera::records::{PersistedDocumentType, PersistedMaybeDocument, PersistedNoDocument};

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn document_round_trip_keeps_data_and_version() {
    let s = serializer();
    let doc = document("rooms/eros", false);

    let decoded = s.decode_maybe_document(&s.encode_maybe_document(&doc)).unwrap();

    assert_eq!(decoded, doc);
    assert_eq!(decoded.version(), version(42, 0));
    assert_eq!(
        decoded.as_document().unwrap().data().get(&field("nested.count")),
        Some(&FieldValue::Integer(3))
    );
}

#[test]
fn slash_inside_a_segment_cannot_form_a_key() {
    assert!(DocumentKey::from_segments(vec!["a/b", "c/d"]).is_err());
    assert!(ResourcePath::from_segments(vec!["rooms", "a/b"]).is_err());
}

#[test]
fn unusual_key_segments_round_trip_through_bytes() {
    let s = serializer();
    let key = DocumentKey::from_segments(vec!["rooms", "with space.and-dots"]).unwrap();
    let doc: MaybeDocument = NoDocument::new(key.clone(), version(7, 0)).into();

    let bytes = s.maybe_document_to_bytes(&doc).unwrap();
    let decoded = s.maybe_document_from_bytes(&bytes).unwrap();

    assert_eq!(decoded, doc);
    assert_eq!(decoded.key().path().segments(), key.path().segments());
}

#[test]
fn tombstone_round_trip() {
    let s = serializer();
    let doc = tombstone("rooms/gone");
    let decoded = s.decode_maybe_document(&s.encode_maybe_document(&doc)).unwrap();
    assert_eq!(decoded, doc);
    assert!(decoded.as_document().is_none());
}

#[test]
fn tombstone_record_holds_name_and_read_time() {
    let s = serializer();
    let record = s.encode_maybe_document(&tombstone("col/doc1"));

    assert_eq!(
        record,
        PersistedMaybeDocument {
            document_type: Some(PersistedDocumentType::NoDocument(PersistedNoDocument {
                name: "projects/test-project/databases/test-db/documents/col/doc1".to_string(),
                read_time: Some(wire::Timestamp {
                    seconds: 5,
                    nanos: 0,
                }),
            })),
        }
    );
}

#[test]
fn empty_document_round_trip() {
    let s = serializer();
    let doc: MaybeDocument =
        Document::new(key("a/b"), version(1, 1), ObjectValue::new(), false).into();
    let decoded = s.decode_maybe_document(&s.encode_maybe_document(&doc)).unwrap();
    assert_eq!(decoded, doc);
}

// ============================================================================
// Local mutation flag
// ============================================================================

#[test]
fn local_mutation_flag_is_not_persisted() {
    let s = serializer();
    let dirty = document("rooms/eros", true);

    let decoded = s.decode_maybe_document(&s.encode_maybe_document(&dirty)).unwrap();

    assert_ne!(decoded, dirty);
    assert_eq!(decoded, document("rooms/eros", false));
    assert!(!decoded.as_document().unwrap().has_local_mutations());
}

#[test]
fn dirty_and_clean_documents_encode_identically() {
    let s = serializer();
    assert_eq!(
        s.maybe_document_to_bytes(&document("rooms/eros", true)).unwrap(),
        s.maybe_document_to_bytes(&document("rooms/eros", false)).unwrap()
    );
}

// ============================================================================
// Corrupt records
// ============================================================================

#[test]
fn record_without_document_type_is_corruption() {
    let s = serializer();
    let err = s
        .decode_maybe_document(&PersistedMaybeDocument {
            document_type: None,
        })
        .unwrap_err();

    assert!(matches!(err, LocalSerializerError::UnknownDocumentType(_)));
    assert!(err.is_corruption());
}

#[test]
fn record_from_another_database_is_rejected() {
    let s = serializer();
    let other = LocalSerializer::new(RemoteSerializer::new(DatabaseId::new("other", "db")));
    let record = other.encode_maybe_document(&document("rooms/eros", false));

    assert!(matches!(
        s.decode_maybe_document(&record),
        Err(LocalSerializerError::Wire(WireError::DatabaseMismatch { .. }))
    ));
}
