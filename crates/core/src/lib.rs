//! Core model types for Tessera
//!
//! This crate defines the in-memory document model the persistence codec
//! translates to and from:
//! - Paths: ResourcePath, DocumentKey, FieldPath
//! - Time: Timestamp, SnapshotVersion
//! - Values: FieldValue, ObjectValue, GeoPoint
//! - Documents: Document, NoDocument, MaybeDocument
//! - Writes: Mutation, Precondition, MutationBatch
//! - Queries: Query, Filter, OrderBy, QueryData, QueryPurpose
//! - DatabaseId: the project/database a client is bound to
//! - ModelError: construction errors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod database_id;
pub mod document;
pub mod error;
pub mod key;
pub mod mutation;
pub mod query;
pub mod query_data;
pub mod value;

pub use contract::{SnapshotVersion, Timestamp};
pub use database_id::{DatabaseId, DEFAULT_DATABASE_ID};
pub use document::{Document, MaybeDocument, NoDocument};
pub use error::{ModelError, Result};
pub use key::{DocumentKey, FieldPath, ResourcePath};
pub use mutation::{Mutation, MutationBatch, Precondition, BATCH_ID_UNKNOWN};
pub use query::{Direction, Filter, Operator, OrderBy, Query};
pub use query_data::{QueryData, QueryPurpose};
pub use value::{FieldValue, GeoPoint, ObjectValue};
