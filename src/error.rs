//! Error types for eventbin
//!
//! `DecodeError` is the closed taxonomy returned by the binary decoder.
//! Everything around it (JSON ingestion, framing, verification) reports
//! through the unified `EventBinError`.

use thiserror::Error;

use crate::event::EventId;

/// Result type alias using EventBinError
pub type Result<T> = std::result::Result<T, EventBinError>;

/// Field the decoder was reading when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Pubkey,
    CreatedAt,
    Kind,
    TagCount,
    TagValueCount,
    TagValue,
    Content,
    Sig,
    FrameLength,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Field::Id => "id",
            Field::Pubkey => "pubkey",
            Field::CreatedAt => "created_at",
            Field::Kind => "kind",
            Field::TagCount => "tag count",
            Field::TagValueCount => "tag value count",
            Field::TagValue => "tag value",
            Field::Content => "content",
            Field::Sig => "sig",
            Field::FrameLength => "frame length",
        };
        f.write_str(name)
    }
}

/// Failure while decoding a binary record
///
/// Returned atomically: a failed decode never yields a partial event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer ended before `field` was fully read
    #[error("truncated input while reading {field}: need {needed} bytes, {available} available")]
    TruncatedInput {
        field: Field,
        needed: usize,
        available: usize,
    },

    /// A length or count exceeds what the varint can hold or what the limits allow
    #[error("{field} overflow: declared {declared}, limit {limit}")]
    Overflow {
        field: Field,
        declared: u64,
        limit: u64,
    },

    /// A string field is not valid UTF-8
    #[error("invalid UTF-8 in {field} at byte {valid_up_to}")]
    InvalidUtf8 { field: Field, valid_up_to: usize },

    /// Bytes remain after the signature
    #[error("{remaining} trailing bytes after end of record")]
    TrailingData { remaining: usize },
}

/// Failure while checking an event against its id and signature
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("event id mismatch: stored {expected}, computed {computed}")]
    IdMismatch { expected: EventId, computed: EventId },

    #[error("signature does not verify for event {0}")]
    BadSignature(EventId),
}

/// Unified error type for eventbin operations
#[derive(Debug, Error)]
pub enum EventBinError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Binary Codec Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Length prefix unreadable; frame alignment is lost
    #[error("Corrupt frame length: {0}")]
    FrameLength(DecodeError),

    #[error("Frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: u64, max: usize },

    // -------------------------------------------------------------------------
    // Text Form Errors
    // -------------------------------------------------------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex in {field}: {reason}")]
    Hex { field: &'static str, reason: String },

    #[error("Kind out of range: {0} (max {max})", max = u16::MAX)]
    KindOutOfRange(u64),

    // -------------------------------------------------------------------------
    // Verification Errors
    // -------------------------------------------------------------------------
    #[error("Verification failed: {0}")]
    Verify(#[from] VerifyError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
