//! Snapshot version type
//!
//! A snapshot version is the server-assigned point in time at which a
//! document or target state was observed. It is a thin wrapper over
//! [`Timestamp`] so the two cannot be confused at API boundaries: a
//! batch's local write time is a client clock reading, never a version.

use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Monotonic server version
///
/// `SnapshotVersion::NONE` (the epoch) means "no version observed yet".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotVersion(Timestamp);

impl SnapshotVersion {
    /// Version that precedes every real server version
    pub const NONE: SnapshotVersion = SnapshotVersion(Timestamp::EPOCH);

    /// Wrap a server timestamp
    #[inline]
    pub const fn new(timestamp: Timestamp) -> Self {
        SnapshotVersion(timestamp)
    }

    /// The underlying timestamp
    #[inline]
    pub const fn timestamp(&self) -> Timestamp {
        self.0
    }

    /// Check if this is the NONE version
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0.is_epoch()
    }
}

impl Default for SnapshotVersion {
    fn default() -> Self {
        SnapshotVersion::NONE
    }
}

impl From<Timestamp> for SnapshotVersion {
    fn from(timestamp: Timestamp) -> Self {
        SnapshotVersion(timestamp)
    }
}

impl std::fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SnapshotVersion({})", self.0)
    }
}
