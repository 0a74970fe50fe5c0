//! Record framing for local storage.
//!
//! Every persisted record is written as one self-checking frame.
//!
//! # Frame Layout
//!
//! ```text
//! ┌─────────────────┬────────────────┬──────────────┬─────────────────────┬──────────┐
//! │ Length (4 bytes)│ Format Ver (1) │ Kind (1)     │ Payload (variable)  │ CRC32 (4)│
//! └─────────────────┴────────────────┴──────────────┴─────────────────────┴──────────┘
//! ```
//!
//! - Length covers format version, kind, payload and CRC
//! - CRC32 covers format version, kind and payload
//! - Payload is the record serialized with MessagePack
//!
//! The kind byte lets a reader reject a record stored under the wrong
//! table before attempting to deserialize it.

use crc32fast::Hasher;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::records::{PersistedMaybeDocument, PersistedTarget, PersistedWriteBatch};

/// Current record format version
pub const RECORD_FORMAT_VERSION: u8 = 1;

/// Bytes of framing around a payload: length + version + kind + crc
pub const FRAME_OVERHEAD: usize = 4 + 1 + 1 + 4;

// Version + kind + CRC
const MIN_FRAME_LENGTH: usize = 6;

// ============================================================================
// Record kinds
// ============================================================================

/// Kind byte stored in every frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RecordKind {
    /// [`PersistedMaybeDocument`]
    MaybeDocument = 1,
    /// [`PersistedWriteBatch`]
    WriteBatch = 2,
    /// [`PersistedTarget`]
    Target = 3,
}

impl RecordKind {
    /// Byte representation
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Parse a kind byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(RecordKind::MaybeDocument),
            2 => Some(RecordKind::WriteBatch),
            3 => Some(RecordKind::Target),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::MaybeDocument => write!(f, "MaybeDocument"),
            RecordKind::WriteBatch => write!(f, "WriteBatch"),
            RecordKind::Target => write!(f, "Target"),
        }
    }
}

/// A record type that can be framed
pub trait PersistedRecord: Serialize + DeserializeOwned {
    /// Kind byte written for this type
    const KIND: RecordKind;
}

impl PersistedRecord for PersistedMaybeDocument {
    const KIND: RecordKind = RecordKind::MaybeDocument;
}

impl PersistedRecord for PersistedWriteBatch {
    const KIND: RecordKind = RecordKind::WriteBatch;
}

impl PersistedRecord for PersistedTarget {
    const KIND: RecordKind = RecordKind::Target;
}

// ============================================================================
// Encode / Decode
// ============================================================================

/// Serialize and frame a record.
pub fn encode_record<R: PersistedRecord>(record: &R) -> Result<Vec<u8>, FormatError> {
    let payload = rmp_serde::to_vec(record).map_err(|e| FormatError::Encode(e.to_string()))?;

    let mut body = Vec::with_capacity(2 + payload.len());
    body.push(RECORD_FORMAT_VERSION);
    body.push(R::KIND.as_byte());
    body.extend_from_slice(&payload);

    let crc = compute_crc(&body);

    let total_len = u32::try_from(body.len() + 4).map_err(|_| {
        FormatError::Encode(format!("record of {} bytes exceeds frame limit", body.len()))
    })?;
    let mut frame = Vec::with_capacity(FRAME_OVERHEAD + payload.len());
    frame.extend_from_slice(&total_len.to_le_bytes());
    frame.extend_from_slice(&body);
    frame.extend_from_slice(&crc.to_le_bytes());
    Ok(frame)
}

/// Parse one frame from the front of `bytes`.
///
/// Returns (record, bytes_consumed) on success. When `verify_checksums` is
/// false the CRC is read but not compared.
pub fn decode_record<R: PersistedRecord>(
    bytes: &[u8],
    verify_checksums: bool,
) -> Result<(R, usize), FormatError> {
    let (body, consumed) = split_frame(bytes, verify_checksums)?;

    let format_version = body[0];
    if format_version != RECORD_FORMAT_VERSION {
        return Err(FormatError::UnsupportedVersion(format_version));
    }

    let kind = RecordKind::from_byte(body[1]).ok_or(FormatError::UnknownKind(body[1]))?;
    if kind != R::KIND {
        return Err(FormatError::KindMismatch {
            expected: R::KIND,
            actual: kind,
        });
    }

    let record = rmp_serde::from_slice(&body[2..]).map_err(|e| FormatError::Decode(e.to_string()))?;
    Ok((record, consumed))
}

/// Parse exactly one frame; trailing bytes are an error.
pub fn decode_single<R: PersistedRecord>(
    bytes: &[u8],
    verify_checksums: bool,
) -> Result<R, FormatError> {
    let (record, consumed) = decode_record(bytes, verify_checksums)?;
    if consumed != bytes.len() {
        return Err(FormatError::TrailingData(bytes.len() - consumed));
    }
    Ok(record)
}

/// Kind of the frame at the front of `bytes`, without decoding the payload
pub fn peek_kind(bytes: &[u8]) -> Result<RecordKind, FormatError> {
    let (body, _) = split_frame(bytes, true)?;
    RecordKind::from_byte(body[1]).ok_or(FormatError::UnknownKind(body[1]))
}

/// Validate length and CRC; returns the checked body and frame size.
fn split_frame(bytes: &[u8], verify_checksums: bool) -> Result<(&[u8], usize), FormatError> {
    if bytes.len() < 4 {
        return Err(FormatError::InsufficientData);
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&bytes[0..4]);
    let length =
        usize::try_from(u32::from_le_bytes(len_bytes)).map_err(|_| FormatError::InvalidFormat)?;

    if length < MIN_FRAME_LENGTH {
        return Err(FormatError::InvalidFormat);
    }
    let frame_len = length.checked_add(4).ok_or(FormatError::InvalidFormat)?;
    if bytes.len() < frame_len {
        return Err(FormatError::InsufficientData);
    }

    let crc_start = frame_len - 4;
    let body = &bytes[4..crc_start];
    if verify_checksums {
        let mut crc_bytes = [0u8; 4];
        crc_bytes.copy_from_slice(&bytes[crc_start..frame_len]);
        let stored_crc = u32::from_le_bytes(crc_bytes);
        let computed_crc = compute_crc(body);
        if computed_crc != stored_crc {
            return Err(FormatError::ChecksumMismatch {
                expected: stored_crc,
                computed: computed_crc,
            });
        }
    }

    Ok((body, frame_len))
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Frame parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Not enough data to parse a frame
    #[error("Insufficient data to parse record")]
    InsufficientData,

    /// Frame length is impossible
    #[error("Invalid record format")]
    InvalidFormat,

    /// Checksum verification failed
    #[error("Checksum mismatch: expected {expected:08x}, computed {computed:08x}")]
    ChecksumMismatch {
        /// Checksum stored in the frame
        expected: u32,
        /// Checksum of the frame body
        computed: u32,
    },

    /// Unsupported format version
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u8),

    /// Frame holds a different record type
    #[error("Record kind mismatch: expected {expected}, found {actual}")]
    KindMismatch {
        /// Requested kind
        expected: RecordKind,
        /// Kind stored in the frame
        actual: RecordKind,
    },

    /// Kind byte names no known record type
    #[error("Unknown record kind: {0}")]
    UnknownKind(u8),

    /// Bytes left over after a single frame
    #[error("{0} trailing bytes after record")]
    TrailingData(usize),

    /// Payload serialization failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// Payload deserialization failed
    #[error("Decode error: {0}")]
    Decode(String),
}
