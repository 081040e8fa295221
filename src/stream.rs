//! Stream framing
//!
//! Encoded records carry no outer length, so on a byte stream each one is
//! prefixed with its size.
//!
//! ```text
//! ┌────────────────┬──────────────────────────┐
//! │ len (varint)   │ encoded record (len)     │  repeated
//! └────────────────┴──────────────────────────┘
//! ```

use std::io::{self, Read, Write};

use crate::codec::layout::MAX_VARINT_LEN;
use crate::codec::varint::{read_var_uint, write_var_uint};
use crate::codec::{decode_with_limits, encode_into, encoded_len};
use crate::config::DecodeLimits;
use crate::error::{EventBinError, Field, Result};
use crate::event::Event;

/// Write one framed event
///
/// Only the frame length is bounded on read by `max_record_len`; the
/// per-field limits of the reader's `DecodeLimits` still apply to the
/// payload. A record written here can therefore be framed correctly and
/// still be rejected with `Overflow` by a reader using tighter limits
/// (e.g. content above 512 KB under `DecodeLimits::default()`).
pub fn write_event<W: Write>(writer: &mut W, event: &Event) -> Result<()> {
    let len = encoded_len(event);
    let mut frame = Vec::with_capacity(MAX_VARINT_LEN + len);
    write_var_uint(&mut frame, len as u64);
    encode_into(event, &mut frame);
    writer.write_all(&frame)?;
    Ok(())
}

/// Read one framed event
///
/// Returns `Ok(None)` on a clean end of stream between frames.
pub fn read_event<R: Read>(reader: &mut R, limits: &DecodeLimits) -> Result<Option<Event>> {
    match read_frame(reader, limits)? {
        Some(frame) => Ok(Some(decode_with_limits(&frame, limits)?)),
        None => Ok(None),
    }
}

/// Read the raw bytes of one frame, without decoding them
pub fn read_frame<R: Read>(reader: &mut R, limits: &DecodeLimits) -> Result<Option<Vec<u8>>> {
    let len = match read_frame_len(reader)? {
        Some(len) => len,
        None => return Ok(None),
    };

    if len > limits.max_record_len as u64 {
        return Err(EventBinError::FrameTooLarge {
            len,
            max: limits.max_record_len,
        });
    }

    let mut frame = vec![0u8; len as usize];
    reader.read_exact(&mut frame)?;
    Ok(Some(frame))
}

/// Read the varint length prefix byte by byte
fn read_frame_len<R: Read>(reader: &mut R) -> Result<Option<u64>> {
    let mut prefix = [0u8; MAX_VARINT_LEN];
    let mut filled = 0;

    loop {
        let mut byte = [0u8; 1];
        match reader.read(&mut byte) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "stream ended inside a frame length",
                )
                .into())
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }

        prefix[filled] = byte[0];
        filled += 1;
        if byte[0] & 0x80 == 0 || filled == MAX_VARINT_LEN {
            break;
        }
    }

    let (len, _) =
        read_var_uint(&prefix[..filled], 0, Field::FrameLength).map_err(EventBinError::FrameLength)?;
    Ok(Some(len))
}

/// Iterator over the events of a framed stream.
///
/// A frame that fails to decode is reported as `Decode` and skipped; the
/// stream stays aligned because its length was known. I/O errors, corrupt
/// length prefixes and oversized frames end the iteration after being
/// reported.
pub struct FrameReader<R> {
    reader: R,
    limits: DecodeLimits,
    done: bool,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, limits: DecodeLimits) -> Self {
        Self {
            reader,
            limits,
            done: false,
        }
    }

    /// Next raw frame, or `None` at end of stream
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }
        let frame = read_frame(&mut self.reader, &self.limits);
        if !matches!(frame, Ok(Some(_))) {
            self.done = true;
        }
        frame
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_frame() {
            Ok(Some(frame)) => Some(decode_with_limits(&frame, &self.limits).map_err(Into::into)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
