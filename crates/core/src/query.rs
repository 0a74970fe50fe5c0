//! Query shapes
//!
//! A [`Query`] is either a lookup of one document by key, or a structured
//! query over a collection (or collection group) with filters, ordering
//! and an optional limit. The persistence layer only needs to tell the two
//! apart; evaluation lives elsewhere.

use crate::key::{DocumentKey, FieldPath, ResourcePath};
use crate::value::FieldValue;

/// Comparison operator of a field filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `==`
    Equal,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// Array field contains the value
    ArrayContains,
}

/// Field filter: `field op value`
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    /// Filtered field
    pub field: FieldPath,
    /// Comparison
    pub op: Operator,
    /// Operand
    pub value: FieldValue,
}

impl Filter {
    /// Create a filter
    pub fn new(field: FieldPath, op: Operator, value: FieldValue) -> Self {
        Filter { field, op, value }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first
    #[default]
    Ascending,
    /// Largest first
    Descending,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderBy {
    /// Sorted field
    pub field: FieldPath,
    /// Sort direction
    pub direction: Direction,
}

impl OrderBy {
    /// Create an ordering clause
    pub fn new(field: FieldPath, direction: Direction) -> Self {
        OrderBy { field, direction }
    }
}

/// Query definition
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    path: ResourcePath,
    collection_group: Option<String>,
    filters: Vec<Filter>,
    order_by: Vec<OrderBy>,
    limit: Option<i32>,
}

impl Query {
    /// Query everything at `path`: a collection, or a single document
    pub fn at_path(path: ResourcePath) -> Self {
        Query {
            path,
            collection_group: None,
            filters: Vec::new(),
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Single-document lookup
    pub fn for_document(key: &DocumentKey) -> Self {
        Query::at_path(key.path().clone())
    }

    /// All collections named `collection_id` under `parent`
    pub fn collection_group(parent: ResourcePath, collection_id: impl Into<String>) -> Self {
        Query {
            collection_group: Some(collection_id.into()),
            ..Query::at_path(parent)
        }
    }

    /// Add a filter
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an ordering clause
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by.push(order_by);
        self
    }

    /// Set the result limit
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Base path
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// Collection group id, if this is a collection group query
    pub fn collection_group_id(&self) -> Option<&str> {
        self.collection_group.as_deref()
    }

    /// Filters in declaration order
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Explicit ordering clauses
    pub fn explicit_order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    /// Result limit
    pub fn limit_value(&self) -> Option<i32> {
        self.limit
    }

    /// True if this query matches exactly one document by key
    ///
    /// Ordering and limit are part of the query, so a document path that
    /// carries either is not a plain key lookup.
    pub fn is_document_query(&self) -> bool {
        DocumentKey::is_document_key(&self.path)
            && self.collection_group.is_none()
            && self.filters.is_empty()
            && self.order_by.is_empty()
            && self.limit.is_none()
    }
}
