//! Round Trip Laws
//!
//! Property tests over generated documents, batches and targets:
//! - decode(encode(doc)) == doc with the local-mutation flag cleared
//! - decode(encode(batch)) == batch
//! - decode(encode(target)) == target for LISTEN targets
//! - an ordered or limited document path never takes the documents form

use crate::common::*;
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

/// Field paths whose segments may need quoting (dots, spaces, backticks)
fn field_path() -> impl Strategy<Value = FieldPath> {
    prop::collection::vec("[ -~]{1,6}", 1..3)
        .prop_map(|segments| FieldPath::from_segments(segments).unwrap())
}

fn doc_key() -> impl Strategy<Value = DocumentKey> {
    prop::collection::vec((segment(), segment()), 1..3).prop_map(|pairs| {
        DocumentKey::from_segments(pairs.into_iter().flat_map(|(c, d)| [c, d])).unwrap()
    })
}

fn snapshot_version() -> impl Strategy<Value = SnapshotVersion> {
    (0i64..4_000_000_000, 0i32..1_000_000_000)
        .prop_map(|(s, n)| SnapshotVersion::new(Timestamp::new(s, n).unwrap()))
}

fn scalar() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        any::<bool>().prop_map(FieldValue::Boolean),
        any::<i64>().prop_map(FieldValue::Integer),
        (-1e12f64..1e12).prop_map(FieldValue::Double),
        "[ -~]{0,16}".prop_map(FieldValue::String),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(FieldValue::Bytes),
        doc_key().prop_map(FieldValue::Reference),
    ]
}

fn object() -> impl Strategy<Value = ObjectValue> {
    let value = scalar().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(FieldValue::Array),
            prop::collection::btree_map(segment(), inner, 0..4)
                .prop_map(|m| FieldValue::Object(ObjectValue::from_map(m))),
        ]
    });
    prop::collection::btree_map(segment(), value, 0..6).prop_map(ObjectValue::from_map)
}

fn maybe_document() -> impl Strategy<Value = MaybeDocument> {
    prop_oneof![
        (doc_key(), snapshot_version(), object(), any::<bool>())
            .prop_map(|(k, v, data, dirty)| MaybeDocument::from(Document::new(k, v, data, dirty))),
        (doc_key(), snapshot_version()).prop_map(|(k, v)| MaybeDocument::from(NoDocument::new(k, v))),
    ]
}

fn mutation() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (doc_key(), object()).prop_map(|(k, data)| Mutation::set(k, data)),
        (doc_key(), object(), prop::collection::btree_set(field_path(), 0..3))
            .prop_map(|(k, data, mask)| Mutation::patch(k, data, mask)),
        doc_key().prop_map(Mutation::delete),
    ]
}

fn batch() -> impl Strategy<Value = MutationBatch> {
    (
        any::<i32>(),
        0i64..4_000_000_000,
        prop::collection::vec(mutation(), 0..6),
    )
        .prop_map(|(id, secs, mutations)| {
            MutationBatch::new(id, Timestamp::from_secs(secs), mutations)
        })
}

fn order_by() -> impl Strategy<Value = OrderBy> {
    (field_path(), any::<bool>()).prop_map(|(f, desc)| {
        let direction = if desc {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        OrderBy::new(f, direction)
    })
}

fn query() -> impl Strategy<Value = Query> {
    let collection_query = (
        doc_key(),
        segment(),
        prop::option::of(1i32..100),
        prop::collection::vec((field_path(), any::<i64>()), 0..3),
        prop::collection::vec(order_by(), 0..3),
    )
        .prop_map(|(parent, id, limit, filters, orders)| {
            let mut q = Query::at_path(parent.path().child(&id).unwrap());
            for (f, v) in filters {
                q = q.filter(Filter::new(f, Operator::GreaterThanOrEqual, FieldValue::Integer(v)));
            }
            for o in orders {
                q = q.order_by(o);
            }
            match limit {
                Some(n) => q.limit(n),
                None => q,
            }
        });
    prop_oneof![
        doc_key().prop_map(|k| Query::for_document(&k)),
        collection_query,
        segment().prop_map(|id| Query::collection_group(ResourcePath::empty(), id)),
    ]
}

/// Document paths carrying an ordering, a limit, or both
fn ordered_document_path() -> impl Strategy<Value = Query> {
    (doc_key(), prop::option::of(order_by()), prop::option::of(1i32..100))
        .prop_filter("needs ordering or limit", |(_, o, l)| o.is_some() || l.is_some())
        .prop_map(|(k, o, l)| {
            let mut q = Query::for_document(&k);
            if let Some(o) = o {
                q = q.order_by(o);
            }
            if let Some(l) = l {
                q = q.limit(l);
            }
            q
        })
}

fn listen_query_data() -> impl Strategy<Value = QueryData> {
    (
        query(),
        any::<i32>(),
        any::<i64>(),
        snapshot_version(),
        prop::collection::vec(any::<u8>(), 0..24),
    )
        .prop_map(|(q, target_id, seq, v, token)| {
            QueryData::new(q, target_id, seq, QueryPurpose::Listen).with_resume_state(v, token)
        })
}

// ============================================================================
// Laws
// ============================================================================

fn clear_local_mutations(doc: MaybeDocument) -> MaybeDocument {
    match doc {
        MaybeDocument::Document(d) => {
            Document::new(d.key().clone(), d.version(), d.data().clone(), false).into()
        }
        other => other,
    }
}

proptest! {
    #[test]
    fn maybe_document_round_trips(doc in maybe_document()) {
        let s = serializer();
        let bytes = s.maybe_document_to_bytes(&doc).unwrap();
        let decoded = s.maybe_document_from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded, clear_local_mutations(doc));
    }

    #[test]
    fn mutation_batch_round_trips(batch in batch()) {
        let s = serializer();
        let bytes = s.mutation_batch_to_bytes(&batch).unwrap();
        prop_assert_eq!(s.mutation_batch_from_bytes(&bytes).unwrap(), batch);
    }

    #[test]
    fn listen_target_round_trips(data in listen_query_data()) {
        let s = serializer();
        let bytes = s.query_data_to_bytes(&data).unwrap();
        prop_assert_eq!(s.query_data_from_bytes(&bytes).unwrap(), data);
    }

    #[test]
    fn ordered_document_path_is_never_truncated(q in ordered_document_path()) {
        let s = serializer();
        prop_assert!(!q.is_document_query());
        let data = QueryData::new(q, 1, 1, QueryPurpose::Listen);
        prop_assert!(s.encode_query_data(&data).is_err());
    }

    #[test]
    fn non_listen_target_never_encodes(data in listen_query_data()) {
        let s = serializer();
        for purpose in [QueryPurpose::ExistenceFilterMismatch, QueryPurpose::LimboResolution] {
            let err = s.encode_query_data(&data.with_purpose(purpose)).unwrap_err();
            prop_assert!(err.is_invariant_violation());
        }
    }
}
