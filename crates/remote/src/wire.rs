//! Wire message types
//!
//! These are the structured messages shared by the network protocol and
//! the persisted records. They carry no validation of their own: a `Value`
//! with no `value_type`, or a `Write` with no `operation`, is representable
//! here and rejected by the codec that decodes it.
//!
//! All types derive `Serialize`/`Deserialize` so the persistence layer can
//! embed them in its records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Primitives
// ============================================================================

/// Seconds + nanos since Unix epoch, unvalidated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// Seconds since Unix epoch
    pub seconds: i64,
    /// Nanosecond fraction
    pub nanos: i32,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Degrees latitude
    pub latitude: f64,
    /// Degrees longitude
    pub longitude: f64,
}

/// Typed field value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Value {
    /// The value; `None` only in malformed input
    pub value_type: Option<ValueType>,
}

impl Value {
    /// Wrap a value type
    pub fn new(value_type: ValueType) -> Self {
        Value {
            value_type: Some(value_type),
        }
    }
}

/// Discriminated value payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueType {
    /// Null
    NullValue,
    /// Boolean
    BooleanValue(bool),
    /// 64-bit integer
    IntegerValue(i64),
    /// 64-bit float
    DoubleValue(f64),
    /// Timestamp
    TimestampValue(Timestamp),
    /// UTF-8 string
    StringValue(String),
    /// Raw bytes
    BytesValue(#[serde(with = "serde_bytes")] Vec<u8>),
    /// Fully qualified document resource name
    ReferenceValue(String),
    /// Geographic point
    GeoPointValue(LatLng),
    /// Array
    ArrayValue(ArrayValue),
    /// Map
    MapValue(MapValue),
}

/// Array of values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    /// Elements in order
    pub values: Vec<Value>,
}

/// Map of values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    /// Fields in key order
    pub fields: BTreeMap<String, Value>,
}

// ============================================================================
// Documents and writes
// ============================================================================

/// Document with its resource name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Fully qualified resource name
    pub name: String,
    /// Top-level fields
    pub fields: BTreeMap<String, Value>,
    /// Last update time. Output-only on the network; always set locally.
    pub update_time: Option<Timestamp>,
}

/// Set of field paths touched by a write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMask {
    /// Dotted field paths
    pub field_paths: Vec<String>,
}

/// Write condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precondition {
    /// Document must (not) exist
    Exists(bool),
    /// Document must have this update time
    UpdateTime(Timestamp),
}

/// Write operation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Write the document (set, or patch when an update mask is present)
    Update(Document),
    /// Delete the named document
    Delete(String),
}

/// Single write
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Write {
    /// The operation; `None` only in malformed input
    pub operation: Option<Operation>,
    /// Fields to update; present for patches only
    pub update_mask: Option<DocumentMask>,
    /// Condition on the current document
    pub current_document: Option<Precondition>,
}

// ============================================================================
// Targets
// ============================================================================

/// Target addressing documents by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentsTarget {
    /// Resource names
    pub documents: Vec<String>,
}

/// Target defined by a structured query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryTarget {
    /// Resource name of the parent document (or the database root)
    pub parent: String,
    /// The query; `None` only in malformed input
    pub structured_query: Option<StructuredQuery>,
}

/// Structured query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Collections to query
    pub from: Vec<CollectionSelector>,
    /// Filter
    #[serde(rename = "where")]
    pub where_: Option<Filter>,
    /// Ordering
    pub order_by: Vec<Order>,
    /// Maximum results
    pub limit: Option<i32>,
}

/// Collection selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSelector {
    /// Collection id
    pub collection_id: String,
    /// Match all descendant collections with this id
    pub all_descendants: bool,
}

/// Reference to a field by dotted path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReference {
    /// Dotted field path
    pub field_path: String,
}

/// Query filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Conjunction of filters
    Composite(CompositeFilter),
    /// Binary comparison
    Field(FieldFilter),
    /// Unary test
    Unary(UnaryFilter),
}

/// Composite operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompositeOperator {
    /// All filters must match
    And,
}

/// Composite filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFilter {
    /// Combining operator
    pub op: CompositeOperator,
    /// Child filters
    pub filters: Vec<Filter>,
}

/// Field comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldOperator {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `==`
    Equal,
    /// Array contains
    ArrayContains,
}

/// Field comparison filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    /// Compared field
    pub field: FieldReference,
    /// Operator
    pub op: FieldOperator,
    /// Operand
    pub value: Value,
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// Field is NaN
    IsNan,
    /// Field is null
    IsNull,
}

/// Unary filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryFilter {
    /// Operator
    pub op: UnaryOperator,
    /// Tested field
    pub field: FieldReference,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Ascending
    Ascending,
    /// Descending
    Descending,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Sorted field
    pub field: FieldReference,
    /// Direction
    pub direction: Direction,
}
