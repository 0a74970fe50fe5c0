//! Concurrency Tests
//!
//! One serializer shared across threads through an `Arc`.

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn serializer_is_send_and_sync() {
    assert_send_sync::<LocalSerializer>();
    assert_send_sync::<LocalSerializer<CountingCodec>>();
}

#[test]
fn parallel_encode_decode_shares_one_serializer() {
    let s = Arc::new(serializer());
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let s = Arc::clone(&s);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for i in 0..50 {
                    let doc = document(&format!("rooms/t{}-{}", t, i), false);
                    let bytes = s.maybe_document_to_bytes(&doc).unwrap();
                    assert_eq!(s.maybe_document_from_bytes(&bytes).unwrap(), doc);

                    let batch = sample_batch(t * 1000 + i);
                    let bytes = s.mutation_batch_to_bytes(&batch).unwrap();
                    assert_eq!(s.mutation_batch_from_bytes(&bytes).unwrap(), batch);

                    let target = listen_target(t * 1000 + i, collection_query());
                    let bytes = s.query_data_to_bytes(&target).unwrap();
                    assert_eq!(s.query_data_from_bytes(&bytes).unwrap(), target);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn encoding_is_deterministic_across_threads() {
    let s = Arc::new(serializer());
    let expected = s.mutation_batch_to_bytes(&sample_batch(1)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = Arc::clone(&s);
            thread::spawn(move || s.mutation_batch_to_bytes(&sample_batch(1)).unwrap())
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
