//! Wire codec for Tessera
//!
//! This crate owns the message shapes shared by the network protocol and
//! the local persistence layer, and the codec between them and the model:
//! - wire: structured messages (values, documents, writes, targets)
//! - codec: the PrimitiveCodec trait
//! - serializer: RemoteSerializer, the database-bound default codec
//! - error: WireError

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod serializer;
pub mod wire;

pub use codec::PrimitiveCodec;
pub use error::WireError;
pub use serializer::RemoteSerializer;
