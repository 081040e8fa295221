//! Decoder
//!
//! Reads an `Event` back from untrusted bytes. Every read is bounds-checked
//! against the input and every declared length against `DecodeLimits`
//! before allocating. On failure nothing is returned but the error.

use crate::config::DecodeLimits;
use crate::error::{DecodeError, Field};
use crate::event::{Event, EventId, PublicKey, Signature, Tag};

use super::layout::{
    CREATED_AT_LEN, CREATED_AT_OFFSET, HEADER_LEN, ID_LEN, ID_OFFSET, KIND_LEN, KIND_OFFSET,
    PUBKEY_LEN, PUBKEY_OFFSET, SIG_LEN,
};
use super::varint::read_var_uint;

/// Fixed-width part of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHeader {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: i64,
    pub kind: u16,
}

/// Decode a record using the default limits
pub fn decode(bytes: &[u8]) -> Result<Event, DecodeError> {
    decode_with_limits(bytes, &DecodeLimits::default())
}

/// Decode a record, rejecting declared lengths above `limits`
pub fn decode_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<Event, DecodeError> {
    let mut reader = Reader::new(bytes);

    let header = reader.header()?;
    let tags = reader.tags(limits)?;
    let content = reader.string(Field::Content, limits.max_content_len)?;
    let sig = Signature(reader.array::<SIG_LEN>(Field::Sig)?);

    let remaining = reader.remaining();
    if remaining > 0 {
        return Err(DecodeError::TrailingData { remaining });
    }

    Ok(Event {
        id: header.id,
        pubkey: header.pubkey,
        created_at: header.created_at,
        kind: header.kind,
        tags,
        content,
        sig,
    })
}

/// Read only the fixed header, without touching tags or content
pub fn peek_header(bytes: &[u8]) -> Result<EventHeader, DecodeError> {
    Reader::new(bytes).header()
}

/// Cursor over the input slice
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take exactly `len` bytes
    fn take(&mut self, field: Field, len: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if available < len {
            return Err(DecodeError::TruncatedInput {
                field,
                needed: len,
                available,
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: Field) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(field, N)?);
        Ok(out)
    }

    /// Varint checked against a policy limit
    fn length(&mut self, field: Field, limit: usize) -> Result<usize, DecodeError> {
        let (value, pos) = read_var_uint(self.buf, self.pos, field)?;
        if value > limit as u64 {
            return Err(DecodeError::Overflow {
                field,
                declared: value,
                limit: limit as u64,
            });
        }
        self.pos = pos;
        Ok(value as usize)
    }

    fn header(&mut self) -> Result<EventHeader, DecodeError> {
        debug_assert_eq!(self.pos, ID_OFFSET);
        let id = EventId(self.array::<ID_LEN>(Field::Id)?);
        debug_assert_eq!(self.pos, PUBKEY_OFFSET);
        let pubkey = PublicKey(self.array::<PUBKEY_LEN>(Field::Pubkey)?);
        debug_assert_eq!(self.pos, CREATED_AT_OFFSET);
        let created_at = i64::from_be_bytes(self.array::<CREATED_AT_LEN>(Field::CreatedAt)?);
        debug_assert_eq!(self.pos, KIND_OFFSET);
        let kind = u16::from_be_bytes(self.array::<KIND_LEN>(Field::Kind)?);
        debug_assert_eq!(self.pos, HEADER_LEN);

        Ok(EventHeader {
            id,
            pubkey,
            created_at,
            kind,
        })
    }

    fn tags(&mut self, limits: &DecodeLimits) -> Result<Vec<Tag>, DecodeError> {
        let count = self.length(Field::TagCount, limits.max_tags)?;
        // Every tag occupies at least one byte, so the input bounds the allocation
        let mut tags = Vec::with_capacity(count.min(self.remaining()));

        for _ in 0..count {
            let arity = self.length(Field::TagValueCount, limits.max_tag_values)?;
            let mut values = Vec::with_capacity(arity.min(self.remaining()));
            for _ in 0..arity {
                values.push(self.string(Field::TagValue, limits.max_tag_value_len)?);
            }
            tags.push(Tag(values));
        }

        Ok(tags)
    }

    fn string(&mut self, field: Field, limit: usize) -> Result<String, DecodeError> {
        let len = self.length(field, limit)?;
        let raw = self.take(field, len)?;
        let s = std::str::from_utf8(raw).map_err(|e| DecodeError::InvalidUtf8 {
            field,
            valid_up_to: e.valid_up_to(),
        })?;
        Ok(s.to_owned())
    }
}
