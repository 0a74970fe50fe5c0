//! Temporal contract types
//!
//! Every persisted record carries time in one of two forms:
//!
//! - `timestamp`: a validated seconds + nanos point in time
//! - `version`: a server-assigned snapshot version wrapping a timestamp
//!
//! Keeping them distinct stops a client clock reading (a batch's local
//! write time) from being stored where a server version belongs.

pub mod timestamp;
pub mod version;

// Re-exports
pub use timestamp::{Timestamp, MAX_SECONDS, MIN_SECONDS};
pub use version::SnapshotVersion;
