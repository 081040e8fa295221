//! # eventbin
//!
//! A compact binary codec for signed event records:
//! - Fixed-width header (id, pubkey, created_at, kind) readable in O(1)
//! - Length-prefixed tags and content carried as raw UTF-8
//! - Strict decoder safe on untrusted input
//! - Canonical-form id hashing with a pluggable signature check
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────────┐   encode    ┌──────────────┐   storage / transport
//! │    Event     │ ──────────► │    bytes     │ ─────────────────────┐
//! └──────────────┘             └──────────────┘                      │
//!        ▲                                                           │
//!        │ decode (+ optional verify_event)                          │
//!        └───────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod event;
pub mod codec;
pub mod batch;
pub mod stream;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{DecodeError, EventBinError, Field, Result, VerifyError};
pub use config::DecodeLimits;
pub use event::{Event, EventId, PublicKey, Signature, SignatureVerifier, Tag};
pub use codec::{decode, decode_with_limits, encode, encode_into, encoded_len, peek_header, EventHeader};
pub use batch::{decode_batch, decode_batch_parallel, BatchFailure, BatchOutcome};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of eventbin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
