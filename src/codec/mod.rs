//! Codec Module
//!
//! Binary encoding of a single event record.
//!
//! ## Responsibilities
//! - `layout`: byte order and widths of the one supported format
//! - `varint`: length/count prefixes
//! - `encoder`: `Event` -> bytes, infallible for valid events
//! - `decoder`: bytes -> `Event`, safe on untrusted input
//!
//! Both directions are pure functions: no shared state, no logging.

pub mod layout;
pub mod varint;
mod encoder;
mod decoder;

pub use encoder::{encode, encode_into, encoded_len};
pub use decoder::{decode, decode_with_limits, peek_header, EventHeader};
