//! Field layout
//!
//! The single supported record layout. There is no version byte: changing
//! anything here changes the format.
//!
//! ```text
//! ┌─────────┬─────────────┬───────────────┬──────────┐
//! │ id (32) │ pubkey (32) │ created_at (8)│ kind (2) │   fixed header, 74 bytes
//! ├─────────┴─────────────┴───────────────┴──────────┤
//! │ tag_count (varint)                               │
//! │   value_count (varint)                           │   per tag
//! │     len (varint) + UTF-8 bytes                   │   per value
//! ├──────────────────────────────────────────────────┤
//! │ content_len (varint) + UTF-8 bytes               │
//! ├──────────────────────────────────────────────────┤
//! │ sig (64)                                         │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Integers are big-endian; `created_at` is two's complement.

pub const ID_LEN: usize = 32;
pub const PUBKEY_LEN: usize = 32;
pub const CREATED_AT_LEN: usize = 8;
pub const KIND_LEN: usize = 2;
pub const SIG_LEN: usize = 64;

pub const ID_OFFSET: usize = 0;
pub const PUBKEY_OFFSET: usize = ID_OFFSET + ID_LEN;
pub const CREATED_AT_OFFSET: usize = PUBKEY_OFFSET + PUBKEY_LEN;
pub const KIND_OFFSET: usize = CREATED_AT_OFFSET + CREATED_AT_LEN;

/// Size of the fixed-width header preceding the tags
pub const HEADER_LEN: usize = KIND_OFFSET + KIND_LEN;

/// Largest value a length/count varint may carry
pub const MAX_VARINT: u64 = u32::MAX as u64;

/// Bytes needed to hold `MAX_VARINT`
pub const MAX_VARINT_LEN: usize = 5;

/// Smallest valid record: no tags, empty content
pub const MIN_RECORD_LEN: usize = HEADER_LEN + 1 + 1 + SIG_LEN;
