//! Shared test utilities for the integration test suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Once;

pub use tessera::wire;
pub use tessera::{
    DatabaseId, Direction, Document, DocumentKey, FieldPath, FieldValue, Filter, LocalSerializer,
    LocalSerializerError, MaybeDocument, Mutation, MutationBatch, NoDocument, ObjectValue,
    Operator, OrderBy, PersistenceConfig, Precondition, PrimitiveCodec, Query, QueryData,
    QueryPurpose, RemoteSerializer, ResourcePath, SnapshotVersion, Timestamp, WireError,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route serializer logs to the test harness output.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Serializers
// ============================================================================

pub fn test_database() -> DatabaseId {
    DatabaseId::new("test-project", "test-db")
}

/// Serializer bound to [`test_database`].
pub fn serializer() -> LocalSerializer {
    init_tracing();
    let config = PersistenceConfig::for_database(test_database());
    LocalSerializer::from_config(&config).unwrap()
}

/// Primitive codec that prefixes keys with `fake:` and counts every call.
///
/// Everything except keys is delegated to a [`RemoteSerializer`], so the
/// local serializer sees a different key format than production.
pub struct CountingCodec {
    inner: RemoteSerializer,
    calls: AtomicUsize,
}

impl CountingCodec {
    pub fn new() -> Self {
        CountingCodec {
            inner: RemoteSerializer::new(test_database()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl PrimitiveCodec for CountingCodec {
    fn encode_key(&self, key: &DocumentKey) -> String {
        self.tick();
        format!("fake:{}", key)
    }

    fn decode_key(&self, name: &str) -> Result<DocumentKey, WireError> {
        self.tick();
        let path = name
            .strip_prefix("fake:")
            .ok_or_else(|| WireError::InvalidResourceName(name.to_string()))?;
        Ok(DocumentKey::from_path_string(path)?)
    }

    fn encode_value(&self, value: &FieldValue) -> wire::Value {
        self.tick();
        self.inner.encode_value(value)
    }

    fn decode_value(&self, value: &wire::Value) -> Result<FieldValue, WireError> {
        self.tick();
        self.inner.decode_value(value)
    }

    fn encode_timestamp(&self, timestamp: &Timestamp) -> wire::Timestamp {
        self.tick();
        self.inner.encode_timestamp(timestamp)
    }

    fn decode_timestamp(&self, timestamp: &wire::Timestamp) -> Result<Timestamp, WireError> {
        self.tick();
        self.inner.decode_timestamp(timestamp)
    }

    fn encode_mutation(&self, mutation: &Mutation) -> wire::Write {
        self.tick();
        self.inner.encode_mutation(mutation)
    }

    fn decode_mutation(&self, write: &wire::Write) -> Result<Mutation, WireError> {
        self.tick();
        self.inner.decode_mutation(write)
    }

    fn encode_documents_target(&self, query: &Query) -> wire::DocumentsTarget {
        self.tick();
        self.inner.encode_documents_target(query)
    }

    fn decode_documents_target(&self, target: &wire::DocumentsTarget) -> Result<Query, WireError> {
        self.tick();
        self.inner.decode_documents_target(target)
    }

    fn encode_query_target(&self, query: &Query) -> Result<wire::QueryTarget, WireError> {
        self.tick();
        self.inner.encode_query_target(query)
    }

    fn decode_query_target(&self, target: &wire::QueryTarget) -> Result<Query, WireError> {
        self.tick();
        self.inner.decode_query_target(target)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn key(path: &str) -> DocumentKey {
    DocumentKey::from_path_string(path).unwrap()
}

pub fn field(path: &str) -> FieldPath {
    FieldPath::from_dotted(path).unwrap()
}

pub fn version(seconds: i64, nanos: i32) -> SnapshotVersion {
    SnapshotVersion::new(Timestamp::new(seconds, nanos).unwrap())
}

pub fn collection(path: &str) -> ResourcePath {
    ResourcePath::from_string(path).unwrap()
}

/// `{ "foo": "bar", "nested": { "count": 3 }, "tags": ["a", "b"] }`
pub fn sample_data() -> ObjectValue {
    ObjectValue::new()
        .with(&field("foo"), FieldValue::from("bar"))
        .with(&field("nested.count"), FieldValue::Integer(3))
        .with(
            &field("tags"),
            FieldValue::Array(vec![FieldValue::from("a"), FieldValue::from("b")]),
        )
}

pub fn document(path: &str, has_local_mutations: bool) -> MaybeDocument {
    Document::new(key(path), version(42, 0), sample_data(), has_local_mutations).into()
}

pub fn tombstone(path: &str) -> MaybeDocument {
    NoDocument::new(key(path), version(5, 0)).into()
}

/// Set, patch, delete in that order.
pub fn sample_batch(batch_id: i32) -> MutationBatch {
    MutationBatch::new(
        batch_id,
        Timestamp::new(1_600_000_000, 123_000).unwrap(),
        vec![
            Mutation::set(key("rooms/eros"), sample_data()),
            Mutation::patch(
                key("rooms/eros"),
                sample_data(),
                [field("foo"), field("nested.count")].into_iter().collect(),
            ),
            Mutation::delete(key("rooms/other")),
        ],
    )
}

/// `rooms` where `size > 3` ordered by `size desc` limit 10
pub fn collection_query() -> Query {
    Query::at_path(collection("rooms"))
        .filter(Filter::new(
            field("size"),
            Operator::GreaterThan,
            FieldValue::Integer(3),
        ))
        .order_by(OrderBy::new(field("size"), Direction::Descending))
        .limit(10)
}

pub fn listen_target(target_id: i32, query: Query) -> QueryData {
    QueryData::new(query, target_id, 1000, QueryPurpose::Listen)
        .with_resume_state(version(1_039, 4_000), b"resume-token".to_vec())
}
