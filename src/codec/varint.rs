//! Length/count varints
//!
//! 7 payload bits per byte, least-significant group first, high bit set on
//! every byte except the last. Values are capped at `MAX_VARINT`.

use bytes::BufMut;

use crate::error::{DecodeError, Field};

use super::layout::{MAX_VARINT, MAX_VARINT_LEN};

/// Number of bytes `write_var_uint` emits for `n`
pub fn var_uint_len(mut n: u64) -> usize {
    let mut len = 1;
    while n >= 0x80 {
        n >>= 7;
        len += 1;
    }
    len
}

/// Append `n` in minimal varint form
///
/// # Panics
/// If `n` exceeds `MAX_VARINT`. Lengths that large cannot be produced by a
/// valid event, so this is a caller bug rather than an input error.
pub fn write_var_uint<B: BufMut + ?Sized>(buf: &mut B, mut n: u64) {
    assert!(
        n <= MAX_VARINT,
        "varint value {} exceeds format maximum {}",
        n,
        MAX_VARINT
    );
    while n >= 0x80 {
        buf.put_u8((n as u8 & 0x7f) | 0x80);
        n >>= 7;
    }
    buf.put_u8(n as u8);
}

/// Read a varint at `cursor`, returning the value and the new cursor.
///
/// `field` only labels the error.
pub fn read_var_uint(buf: &[u8], cursor: usize, field: Field) -> Result<(u64, usize), DecodeError> {
    let mut value: u64 = 0;
    let mut pos = cursor;

    for i in 0..MAX_VARINT_LEN {
        let byte = *buf.get(pos).ok_or(DecodeError::TruncatedInput {
            field,
            needed: i + 1,
            available: i,
        })?;
        pos += 1;

        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            if value > MAX_VARINT {
                return Err(DecodeError::Overflow {
                    field,
                    declared: value,
                    limit: MAX_VARINT,
                });
            }
            return Ok((value, pos));
        }
    }

    // Continuation bit still set after the last permitted byte
    Err(DecodeError::Overflow {
        field,
        declared: value,
        limit: MAX_VARINT,
    })
}
