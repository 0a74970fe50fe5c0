//! Default primitive codec.
//!
//! `RemoteSerializer` speaks the same wire shapes as the network protocol.
//! It is bound to one [`DatabaseId`]: keys encode as fully qualified
//! resource names and decoding rejects names from any other database.
//!
//! # Resource Names
//!
//! ```text
//! projects/{project_id}/databases/{database_id}/documents/{path}
//! ```
//!
//! Query parents may address the database root, in which case the
//! `/{path}` suffix is absent.

use crate::codec::PrimitiveCodec;
use crate::error::WireError;
use crate::wire;
use std::collections::BTreeSet;
use tessera_core::{
    DatabaseId, Direction, DocumentKey, FieldPath, FieldValue, Filter, GeoPoint, Mutation,
    ObjectValue, Operator, OrderBy, Precondition, Query, ResourcePath, Timestamp,
};
use tracing::warn;

/// Primitive codec bound to one database
#[derive(Debug, Clone)]
pub struct RemoteSerializer {
    database_id: DatabaseId,
    database_name: String,
}

impl RemoteSerializer {
    /// Create a codec for `database_id`
    pub fn new(database_id: DatabaseId) -> Self {
        let database_name = database_id.to_string();
        RemoteSerializer {
            database_id,
            database_name,
        }
    }

    /// Database this codec is bound to
    pub fn database_id(&self) -> &DatabaseId {
        &self.database_id
    }

    // =========================================================================
    // Resource names
    // =========================================================================

    /// Resource name for a path relative to the documents root
    pub fn encode_resource_name(&self, path: &ResourcePath) -> String {
        if path.is_empty() {
            format!("{}/documents", self.database_name)
        } else {
            format!("{}/documents/{}", self.database_name, path)
        }
    }

    /// Path relative to the documents root; may be empty
    pub fn decode_resource_name(&self, name: &str) -> Result<ResourcePath, WireError> {
        let resource = ResourcePath::from_string(name)
            .map_err(|_| WireError::InvalidResourceName(name.to_string()))?;
        let segments = resource.segments();

        let well_formed = segments.len() >= 5
            && segments[0] == "projects"
            && segments[2] == "databases"
            && segments[4] == "documents";
        if !well_formed {
            return Err(WireError::InvalidResourceName(name.to_string()));
        }

        if segments[1] != self.database_id.project_id || segments[3] != self.database_id.database_id
        {
            let actual = format!("projects/{}/databases/{}", segments[1], segments[3]);
            warn!(expected = %self.database_name, %actual, "Resource name from another database");
            return Err(WireError::DatabaseMismatch {
                expected: self.database_name.clone(),
                actual,
            });
        }

        Ok(ResourcePath::from_segments(segments[5..].iter().cloned())?)
    }

    // =========================================================================
    // Preconditions and masks
    // =========================================================================

    fn encode_precondition(&self, precondition: Precondition) -> Option<wire::Precondition> {
        match precondition {
            Precondition::None => None,
            Precondition::Exists(exists) => Some(wire::Precondition::Exists(exists)),
            Precondition::UpdateTime(version) => {
                Some(wire::Precondition::UpdateTime(self.encode_version(&version)))
            }
        }
    }

    fn decode_precondition(
        &self,
        precondition: Option<&wire::Precondition>,
    ) -> Result<Precondition, WireError> {
        Ok(match precondition {
            None => Precondition::None,
            Some(wire::Precondition::Exists(exists)) => Precondition::Exists(*exists),
            Some(wire::Precondition::UpdateTime(ts)) => {
                Precondition::UpdateTime(self.decode_version(ts)?)
            }
        })
    }

    fn encode_document(&self, key: &DocumentKey, value: &ObjectValue) -> wire::Document {
        wire::Document {
            name: self.encode_key(key),
            fields: self.encode_fields(value),
            update_time: None,
        }
    }

    // =========================================================================
    // Filters
    // =========================================================================

    fn encode_filters(&self, filters: &[Filter]) -> Option<wire::Filter> {
        match filters {
            [] => None,
            [single] => Some(self.encode_filter(single)),
            many => Some(wire::Filter::Composite(wire::CompositeFilter {
                op: wire::CompositeOperator::And,
                filters: many.iter().map(|f| self.encode_filter(f)).collect(),
            })),
        }
    }

    fn encode_filter(&self, filter: &Filter) -> wire::Filter {
        let field = wire::FieldReference {
            field_path: filter.field.canonical_string(),
        };
        if filter.op == Operator::Equal {
            if filter.value.is_null() {
                return wire::Filter::Unary(wire::UnaryFilter {
                    op: wire::UnaryOperator::IsNull,
                    field,
                });
            }
            if filter.value.is_nan() {
                return wire::Filter::Unary(wire::UnaryFilter {
                    op: wire::UnaryOperator::IsNan,
                    field,
                });
            }
        }
        let op = match filter.op {
            Operator::LessThan => wire::FieldOperator::LessThan,
            Operator::LessThanOrEqual => wire::FieldOperator::LessThanOrEqual,
            Operator::Equal => wire::FieldOperator::Equal,
            Operator::GreaterThan => wire::FieldOperator::GreaterThan,
            Operator::GreaterThanOrEqual => wire::FieldOperator::GreaterThanOrEqual,
            Operator::ArrayContains => wire::FieldOperator::ArrayContains,
        };
        wire::Filter::Field(wire::FieldFilter {
            field,
            op,
            value: self.encode_value(&filter.value),
        })
    }

    fn decode_filters(&self, filter: &wire::Filter, out: &mut Vec<Filter>) -> Result<(), WireError> {
        match filter {
            wire::Filter::Composite(composite) => {
                // AND is the only composite operator
                for child in &composite.filters {
                    self.decode_filters(child, out)?;
                }
            }
            wire::Filter::Field(f) => {
                let op = match f.op {
                    wire::FieldOperator::LessThan => Operator::LessThan,
                    wire::FieldOperator::LessThanOrEqual => Operator::LessThanOrEqual,
                    wire::FieldOperator::Equal => Operator::Equal,
                    wire::FieldOperator::GreaterThan => Operator::GreaterThan,
                    wire::FieldOperator::GreaterThanOrEqual => Operator::GreaterThanOrEqual,
                    wire::FieldOperator::ArrayContains => Operator::ArrayContains,
                };
                out.push(Filter::new(
                    FieldPath::from_server_format(&f.field.field_path)?,
                    op,
                    self.decode_value(&f.value)?,
                ));
            }
            wire::Filter::Unary(u) => {
                let value = match u.op {
                    wire::UnaryOperator::IsNull => FieldValue::Null,
                    wire::UnaryOperator::IsNan => FieldValue::Double(f64::NAN),
                };
                out.push(Filter::new(
                    FieldPath::from_server_format(&u.field.field_path)?,
                    Operator::Equal,
                    value,
                ));
            }
        }
        Ok(())
    }

    fn encode_order(&self, order_by: &OrderBy) -> wire::Order {
        wire::Order {
            field: wire::FieldReference {
                field_path: order_by.field.canonical_string(),
            },
            direction: match order_by.direction {
                Direction::Ascending => wire::Direction::Ascending,
                Direction::Descending => wire::Direction::Descending,
            },
        }
    }

    fn decode_order(&self, order: &wire::Order) -> Result<OrderBy, WireError> {
        let direction = match order.direction {
            wire::Direction::Ascending => Direction::Ascending,
            wire::Direction::Descending => Direction::Descending,
        };
        Ok(OrderBy::new(
            FieldPath::from_server_format(&order.field.field_path)?,
            direction,
        ))
    }
}

impl PrimitiveCodec for RemoteSerializer {
    fn encode_key(&self, key: &DocumentKey) -> String {
        self.encode_resource_name(key.path())
    }

    fn decode_key(&self, name: &str) -> Result<DocumentKey, WireError> {
        let path = self.decode_resource_name(name)?;
        Ok(DocumentKey::from_path(path)?)
    }

    fn encode_value(&self, value: &FieldValue) -> wire::Value {
        let value_type = match value {
            FieldValue::Null => wire::ValueType::NullValue,
            FieldValue::Boolean(b) => wire::ValueType::BooleanValue(*b),
            FieldValue::Integer(i) => wire::ValueType::IntegerValue(*i),
            FieldValue::Double(d) => wire::ValueType::DoubleValue(*d),
            FieldValue::Timestamp(ts) => wire::ValueType::TimestampValue(self.encode_timestamp(ts)),
            FieldValue::String(s) => wire::ValueType::StringValue(s.clone()),
            FieldValue::Bytes(b) => wire::ValueType::BytesValue(b.clone()),
            FieldValue::Reference(key) => wire::ValueType::ReferenceValue(self.encode_key(key)),
            FieldValue::GeoPoint(point) => wire::ValueType::GeoPointValue(wire::LatLng {
                latitude: point.latitude,
                longitude: point.longitude,
            }),
            FieldValue::Array(values) => wire::ValueType::ArrayValue(wire::ArrayValue {
                values: values.iter().map(|v| self.encode_value(v)).collect(),
            }),
            FieldValue::Object(obj) => wire::ValueType::MapValue(wire::MapValue {
                fields: self.encode_fields(obj),
            }),
        };
        wire::Value::new(value_type)
    }

    fn decode_value(&self, value: &wire::Value) -> Result<FieldValue, WireError> {
        let value_type = value
            .value_type
            .as_ref()
            .ok_or(WireError::MissingField("value_type"))?;
        Ok(match value_type {
            wire::ValueType::NullValue => FieldValue::Null,
            wire::ValueType::BooleanValue(b) => FieldValue::Boolean(*b),
            wire::ValueType::IntegerValue(i) => FieldValue::Integer(*i),
            wire::ValueType::DoubleValue(d) => FieldValue::Double(*d),
            wire::ValueType::TimestampValue(ts) => {
                FieldValue::Timestamp(self.decode_timestamp(ts)?)
            }
            wire::ValueType::StringValue(s) => FieldValue::String(s.clone()),
            wire::ValueType::BytesValue(b) => FieldValue::Bytes(b.clone()),
            wire::ValueType::ReferenceValue(name) => FieldValue::Reference(self.decode_key(name)?),
            wire::ValueType::GeoPointValue(point) => FieldValue::GeoPoint(GeoPoint {
                latitude: point.latitude,
                longitude: point.longitude,
            }),
            wire::ValueType::ArrayValue(array) => FieldValue::Array(
                array
                    .values
                    .iter()
                    .map(|v| self.decode_value(v))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            wire::ValueType::MapValue(map) => FieldValue::Object(self.decode_fields(&map.fields)?),
        })
    }

    fn encode_timestamp(&self, timestamp: &Timestamp) -> wire::Timestamp {
        wire::Timestamp {
            seconds: timestamp.seconds(),
            nanos: timestamp.nanos(),
        }
    }

    fn decode_timestamp(&self, timestamp: &wire::Timestamp) -> Result<Timestamp, WireError> {
        Ok(Timestamp::new(timestamp.seconds, timestamp.nanos)?)
    }

    fn encode_mutation(&self, mutation: &Mutation) -> wire::Write {
        let current_document = self.encode_precondition(mutation.precondition());
        match mutation {
            Mutation::Set { key, value, .. } => wire::Write {
                operation: Some(wire::Operation::Update(self.encode_document(key, value))),
                update_mask: None,
                current_document,
            },
            Mutation::Patch {
                key, value, mask, ..
            } => wire::Write {
                operation: Some(wire::Operation::Update(self.encode_document(key, value))),
                update_mask: Some(wire::DocumentMask {
                    field_paths: mask.iter().map(FieldPath::canonical_string).collect(),
                }),
                current_document,
            },
            Mutation::Delete { key, .. } => wire::Write {
                operation: Some(wire::Operation::Delete(self.encode_key(key))),
                update_mask: None,
                current_document,
            },
        }
    }

    fn decode_mutation(&self, write: &wire::Write) -> Result<Mutation, WireError> {
        let precondition = self.decode_precondition(write.current_document.as_ref())?;
        let operation = write
            .operation
            .as_ref()
            .ok_or(WireError::MissingField("operation"))?;

        match operation {
            wire::Operation::Update(doc) => {
                let key = self.decode_key(&doc.name)?;
                let value = self.decode_fields(&doc.fields)?;
                match &write.update_mask {
                    Some(mask) => {
                        let mask = mask
                            .field_paths
                            .iter()
                            .map(|p| FieldPath::from_server_format(p))
                            .collect::<Result<BTreeSet<_>, _>>()?;
                        Ok(Mutation::Patch {
                            key,
                            value,
                            mask,
                            precondition,
                        })
                    }
                    None => Ok(Mutation::Set {
                        key,
                        value,
                        precondition,
                    }),
                }
            }
            wire::Operation::Delete(name) => Ok(Mutation::Delete {
                key: self.decode_key(name)?,
                precondition,
            }),
        }
    }

    fn encode_documents_target(&self, query: &Query) -> wire::DocumentsTarget {
        wire::DocumentsTarget {
            documents: vec![self.encode_resource_name(query.path())],
        }
    }

    fn decode_documents_target(&self, target: &wire::DocumentsTarget) -> Result<Query, WireError> {
        match target.documents.as_slice() {
            [name] => Ok(Query::for_document(&self.decode_key(name)?)),
            other => Err(WireError::InvalidTarget(format!(
                "DocumentsTarget contained {} documents, expected 1",
                other.len()
            ))),
        }
    }

    fn encode_query_target(&self, query: &Query) -> Result<wire::QueryTarget, WireError> {
        let path = query.path();
        let (parent, from) = match query.collection_group_id() {
            Some(group) => (
                self.encode_resource_name(path),
                wire::CollectionSelector {
                    collection_id: group.to_string(),
                    all_descendants: true,
                },
            ),
            None => {
                if path.len() % 2 == 0 {
                    return Err(WireError::UnsupportedQuery(format!(
                        "query at {:?} does not address a collection",
                        path.canonical_string()
                    )));
                }
                (
                    self.encode_resource_name(&path.pop_last()),
                    wire::CollectionSelector {
                        collection_id: path.last_segment().unwrap_or_default().to_string(),
                        all_descendants: false,
                    },
                )
            }
        };

        Ok(wire::QueryTarget {
            parent,
            structured_query: Some(wire::StructuredQuery {
                from: vec![from],
                where_: self.encode_filters(query.filters()),
                order_by: query
                    .explicit_order_by()
                    .iter()
                    .map(|o| self.encode_order(o))
                    .collect(),
                limit: query.limit_value(),
            }),
        })
    }

    fn decode_query_target(&self, target: &wire::QueryTarget) -> Result<Query, WireError> {
        let parent = self.decode_resource_name(&target.parent)?;
        let structured = target
            .structured_query
            .as_ref()
            .ok_or(WireError::MissingField("structured_query"))?;

        let mut query = match structured.from.as_slice() {
            [] => Query::at_path(parent),
            [from] if from.all_descendants => {
                Query::collection_group(parent, from.collection_id.clone())
            }
            [from] => Query::at_path(parent.child(&from.collection_id)?),
            many => {
                return Err(WireError::InvalidTarget(format!(
                    "StructuredQuery.from with {} collections is not supported",
                    many.len()
                )))
            }
        };

        if let Some(filter) = &structured.where_ {
            let mut filters = Vec::new();
            self.decode_filters(filter, &mut filters)?;
            for filter in filters {
                query = query.filter(filter);
            }
        }
        for order in &structured.order_by {
            query = query.order_by(self.decode_order(order)?);
        }
        if let Some(limit) = structured.limit {
            query = query.limit(limit);
        }
        Ok(query)
    }
}
