//! Field value types
//!
//! This module defines:
//! - [`FieldValue`]: typed value stored in a document field
//! - [`ObjectValue`]: ordered mapping from field name to value
//! - [`GeoPoint`]: latitude/longitude pair
//!
//! ### Type Rules
//!
//! - No implicit coercions: `Integer(1) != Double(1.0)`
//! - `Bytes` are not `String`
//! - Doubles compare with IEEE-754 semantics: `NaN != NaN`, `-0.0 == 0.0`
//! - Object fields iterate in key order

use crate::contract::Timestamp;
use crate::key::{DocumentKey, FieldPath};
use std::collections::BTreeMap;

/// Geographic point (degrees)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in `[-90, 90]`
    pub latitude: f64,
    /// Longitude in `[-180, 180]`
    pub longitude: f64,
}

/// Typed value of a document field
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 64-bit signed integer
    Integer(i64),
    /// 64-bit floating point
    Double(f64),
    /// Point in time
    Timestamp(Timestamp),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Reference to another document in the same database
    Reference(DocumentKey),
    /// Geographic point
    GeoPoint(GeoPoint),
    /// Ordered list of values
    Array(Vec<FieldValue>),
    /// Nested map
    Object(ObjectValue),
}

// Custom PartialEq for IEEE-754 double semantics
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a == b,
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a == b,
            (FieldValue::Double(a), FieldValue::Double(b)) => a == b,
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Bytes(a), FieldValue::Bytes(b)) => a == b,
            (FieldValue::Reference(a), FieldValue::Reference(b)) => a == b,
            (FieldValue::GeoPoint(a), FieldValue::GeoPoint(b)) => a == b,
            (FieldValue::Array(a), FieldValue::Array(b)) => a == b,
            (FieldValue::Object(a), FieldValue::Object(b)) => a == b,
            // Different types are never equal
            _ => false,
        }
    }
}

impl FieldValue {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "Null",
            FieldValue::Boolean(_) => "Boolean",
            FieldValue::Integer(_) => "Integer",
            FieldValue::Double(_) => "Double",
            FieldValue::Timestamp(_) => "Timestamp",
            FieldValue::String(_) => "String",
            FieldValue::Bytes(_) => "Bytes",
            FieldValue::Reference(_) => "Reference",
            FieldValue::GeoPoint(_) => "GeoPoint",
            FieldValue::Array(_) => "Array",
            FieldValue::Object(_) => "Object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Check if this is a NaN double
    pub fn is_nan(&self) -> bool {
        matches!(self, FieldValue::Double(d) if d.is_nan())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(d: f64) -> Self {
        FieldValue::Double(d)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<ObjectValue> for FieldValue {
    fn from(o: ObjectValue) -> Self {
        FieldValue::Object(o)
    }
}

/// Ordered mapping from field name to value
///
/// This is the data of a document. Nested maps are `FieldValue::Object`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectValue {
    fields: BTreeMap<String, FieldValue>,
}

impl ObjectValue {
    /// Empty object
    pub fn new() -> Self {
        ObjectValue::default()
    }

    /// Wrap an existing field map
    pub fn from_map(fields: BTreeMap<String, FieldValue>) -> Self {
        ObjectValue { fields }
    }

    /// Top-level fields in key order
    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }

    /// Consume into the top-level field map
    pub fn into_fields(self) -> BTreeMap<String, FieldValue> {
        self.fields
    }

    /// Number of top-level fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when there are no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate top-level `(name, value)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// Look up a possibly nested field
    pub fn get(&self, path: &FieldPath) -> Option<&FieldValue> {
        let mut current = self.fields.get(path.first_segment())?;
        for segment in &path.segments()[1..] {
            match current {
                FieldValue::Object(obj) => current = obj.fields.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Set a possibly nested field, creating intermediate maps
    ///
    /// A non-map value sitting on the path is replaced by a map.
    pub fn set(&mut self, path: &FieldPath, value: FieldValue) {
        match path.pop_first() {
            None => {
                self.fields.insert(path.first_segment().to_string(), value);
            }
            Some(rest) => {
                let entry = self
                    .fields
                    .entry(path.first_segment().to_string())
                    .or_insert_with(|| FieldValue::Object(ObjectValue::new()));
                if !matches!(entry, FieldValue::Object(_)) {
                    *entry = FieldValue::Object(ObjectValue::new());
                }
                if let FieldValue::Object(child) = entry {
                    child.set(&rest, value);
                }
            }
        }
    }

    /// Builder-style `set`
    pub fn with(mut self, path: &FieldPath, value: FieldValue) -> Self {
        self.set(path, value);
        self
    }
}

impl FromIterator<(String, FieldValue)> for ObjectValue {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        ObjectValue {
            fields: iter.into_iter().collect(),
        }
    }
}
