//! Mutation Batch Tests
//!
//! Pending write batches keep their id, local write time and the exact
//! order of their writes.

use crate::common::*;

#[test]
fn batch_round_trip() {
    let s = serializer();
    let batch = sample_batch(7);

    let decoded = s
        .decode_mutation_batch(&s.encode_mutation_batch(&batch))
        .unwrap();

    assert_eq!(decoded, batch);
    assert_eq!(decoded.batch_id(), 7);
    assert_eq!(
        decoded.local_write_time(),
        Timestamp::new(1_600_000_000, 123_000).unwrap()
    );
}

#[test]
fn writes_keep_their_order() {
    let s = serializer();
    let batch = MutationBatch::new(
        1,
        Timestamp::from_secs(1),
        (0..20)
            .map(|i| Mutation::delete(key(&format!("items/{:02}", 19 - i))))
            .collect(),
    );

    let record = s.encode_mutation_batch(&batch);
    assert_eq!(record.writes.len(), 20);

    let decoded = s.decode_mutation_batch(&record).unwrap();
    let keys: Vec<String> = decoded
        .mutations()
        .iter()
        .map(|m| m.key().to_string())
        .collect();
    let expected: Vec<String> = (0..20).map(|i| format!("items/{:02}", 19 - i)).collect();
    assert_eq!(keys, expected);
}

#[test]
fn same_key_writes_are_not_merged() {
    let s = serializer();
    let batch = sample_batch(3);
    let decoded = s
        .decode_mutation_batch(&s.encode_mutation_batch(&batch))
        .unwrap();

    assert_eq!(decoded.mutations().len(), 3);
    assert!(matches!(decoded.mutations()[0], Mutation::Set { .. }));
    assert!(matches!(decoded.mutations()[1], Mutation::Patch { .. }));
    assert_eq!(decoded.mutations()[0].key(), decoded.mutations()[1].key());
}

#[test]
fn patch_keeps_mask_and_precondition() {
    let s = serializer();
    let decoded = s
        .decode_mutation_batch(&s.encode_mutation_batch(&sample_batch(3)))
        .unwrap();

    match &decoded.mutations()[1] {
        Mutation::Patch {
            mask, precondition, ..
        } => {
            assert_eq!(mask.len(), 2);
            assert!(mask.contains(&field("nested.count")));
            assert_eq!(*precondition, Precondition::Exists(true));
        }
        other => panic!("Expected patch, got {:?}", other),
    }
}

#[test]
fn batch_bytes_round_trip() {
    let s = serializer();
    let batch = sample_batch(11);
    let bytes = s.mutation_batch_to_bytes(&batch).unwrap();
    assert_eq!(s.mutation_batch_from_bytes(&bytes).unwrap(), batch);
}

#[test]
fn patch_of_field_name_containing_dot_is_not_split() {
    let s = serializer();
    let literal = FieldPath::from_segments(vec!["a.b"]).unwrap();
    let batch = MutationBatch::new(
        4,
        Timestamp::from_secs(100),
        vec![Mutation::patch(
            key("rooms/eros"),
            ObjectValue::new().with(&literal, FieldValue::Integer(1)),
            [literal.clone()].into_iter().collect(),
        )],
    );

    let bytes = s.mutation_batch_to_bytes(&batch).unwrap();
    let decoded = s.mutation_batch_from_bytes(&bytes).unwrap();

    assert_eq!(decoded, batch);
    match &decoded.mutations()[0] {
        Mutation::Patch { mask, .. } => {
            assert!(mask.contains(&literal));
            assert!(!mask.contains(&field("a.b")));
        }
        other => panic!("Expected patch, got {:?}", other),
    }
}
