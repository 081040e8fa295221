//! Encoder
//!
//! Writes an `Event` in layout order. Encoding cannot fail for any value
//! the `Event` type can hold, short of strings longer than `MAX_VARINT`.

use bytes::BufMut;

use crate::event::Event;

use super::layout::{HEADER_LEN, SIG_LEN};
use super::varint::{var_uint_len, write_var_uint};

/// Exact encoded size of `event`
///
/// Used to size the output buffer once; it walks tags but copies nothing.
pub fn encoded_len(event: &Event) -> usize {
    let tags_len: usize = event
        .tags
        .iter()
        .map(|tag| {
            var_uint_len(tag.len() as u64)
                + tag
                    .values()
                    .iter()
                    .map(|v| var_uint_len(v.len() as u64) + v.len())
                    .sum::<usize>()
        })
        .sum();

    HEADER_LEN
        + var_uint_len(event.tags.len() as u64)
        + tags_len
        + var_uint_len(event.content.len() as u64)
        + event.content.len()
        + SIG_LEN
}

/// Encode an event into a new buffer
///
/// # Panics
/// If a tag count, tag arity or string length exceeds `u32::MAX`.
pub fn encode(event: &Event) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(event));
    encode_into(event, &mut buf);
    buf
}

/// Append the encoding of `event` to `buf`
///
/// # Panics
/// Same as [`encode`].
pub fn encode_into<B: BufMut + ?Sized>(event: &Event, buf: &mut B) {
    // Fixed header
    buf.put_slice(event.id.as_bytes());
    buf.put_slice(event.pubkey.as_bytes());
    buf.put_i64(event.created_at);
    buf.put_u16(event.kind);

    // Tags
    write_var_uint(buf, event.tags.len() as u64);
    for tag in &event.tags {
        write_var_uint(buf, tag.len() as u64);
        for value in tag.values() {
            write_str(buf, value);
        }
    }

    write_str(buf, &event.content);

    buf.put_slice(event.sig.as_bytes());
}

fn write_str<B: BufMut + ?Sized>(buf: &mut B, s: &str) {
    write_var_uint(buf, s.len() as u64);
    buf.put_slice(s.as_bytes());
}
