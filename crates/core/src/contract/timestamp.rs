//! Nanosecond-precision timestamp type
//!
//! Timestamps are the temporal component of every persisted record: the
//! update time of a document, the read time of a tombstone, the local write
//! time of a mutation batch, and the snapshot version of a target.
//!
//! ## Precision and Range
//!
//! A timestamp is a count of seconds since Unix epoch plus a non-negative
//! nanosecond fraction. The representable range is
//! `0001-01-01T00:00:00Z` through `9999-12-31T23:59:59.999999999Z`, which
//! matches what the wire format accepts.
//!
//! ```
//! use tessera_core::Timestamp;
//!
//! let ts = Timestamp::new(1_700_000_000, 500).unwrap();
//! assert_eq!(ts.seconds(), 1_700_000_000);
//! assert!(Timestamp::new(0, 1_000_000_000).is_err());
//! ```

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds of 0001-01-01T00:00:00Z
pub const MIN_SECONDS: i64 = -62_135_596_800;

/// Seconds of 9999-12-31T23:59:59Z
pub const MAX_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Point in time as seconds + nanoseconds since Unix epoch
///
/// ## Invariants
///
/// - `nanos` is always in `0..1_000_000_000`
/// - `seconds` is always in `MIN_SECONDS..=MAX_SECONDS`
/// - Ordering is chronological (derived field order: seconds, then nanos)
/// - Deserialization goes through [`Timestamp::new`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimestamp")]
pub struct Timestamp {
    seconds: i64,
    nanos: i32,
}

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC)
    pub const EPOCH: Timestamp = Timestamp {
        seconds: 0,
        nanos: 0,
    };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp, validating both components
    pub fn new(seconds: i64, nanos: i32) -> Result<Self> {
        if !(0..NANOS_PER_SECOND).contains(&nanos) || !(MIN_SECONDS..=MAX_SECONDS).contains(&seconds)
        {
            return Err(ModelError::TimestampOutOfRange { seconds, nanos });
        }
        Ok(Timestamp { seconds, nanos })
    }

    /// Create a timestamp for the current moment
    ///
    /// Returns epoch if the system clock is before Unix epoch.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Timestamp::from(duration)
    }

    /// Create a timestamp from whole seconds since epoch
    ///
    /// Seconds are clamped into the representable range.
    pub fn from_secs(seconds: i64) -> Self {
        Timestamp {
            seconds: seconds.clamp(MIN_SECONDS, MAX_SECONDS),
            nanos: 0,
        }
    }

    /// Create a timestamp from milliseconds since epoch
    pub fn from_millis(millis: i64) -> Self {
        let seconds = millis.div_euclid(1_000);
        let nanos = (millis.rem_euclid(1_000) * 1_000_000) as i32;
        match Timestamp::new(seconds, nanos) {
            Ok(ts) => ts,
            Err(_) => Timestamp::from_secs(seconds),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Seconds since Unix epoch
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond fraction of the current second
    #[inline]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Check if this is the epoch timestamp
    #[inline]
    pub const fn is_epoch(&self) -> bool {
        self.seconds == 0 && self.nanos == 0
    }
}

// Unvalidated serde shape
#[derive(Deserialize)]
struct RawTimestamp {
    seconds: i64,
    nanos: i32,
}

impl TryFrom<RawTimestamp> for Timestamp {
    type Error = ModelError;

    fn try_from(raw: RawTimestamp) -> Result<Self> {
        Timestamp::new(raw.seconds, raw.nanos)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Timestamp::EPOCH
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match chrono::DateTime::from_timestamp(self.seconds, self.nanos as u32) {
            Some(dt) => write!(
                f,
                "{}",
                dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
            ),
            None => write!(f, "{}.{:09}", self.seconds, self.nanos),
        }
    }
}

// ============================================================================
// From Implementations
// ============================================================================

impl From<Duration> for Timestamp {
    /// Create from duration since epoch, saturating at the maximum
    fn from(duration: Duration) -> Self {
        let seconds = i64::try_from(duration.as_secs()).unwrap_or(MAX_SECONDS);
        if seconds > MAX_SECONDS {
            return Timestamp {
                seconds: MAX_SECONDS,
                nanos: NANOS_PER_SECOND - 1,
            };
        }
        Timestamp {
            seconds,
            nanos: duration.subsec_nanos() as i32,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
