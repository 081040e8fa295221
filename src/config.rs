//! Decode limits for eventbin
//!
//! The decoder accepts untrusted bytes, so every declared length and count
//! is checked against these limits before anything is allocated.

use crate::codec::layout;
use crate::error::{EventBinError, Result};

/// Resource limits applied while decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    // -------------------------------------------------------------------------
    // String Limits
    // -------------------------------------------------------------------------
    /// Max bytes of `content`
    pub max_content_len: usize,

    /// Max bytes of a single tag string
    pub max_tag_value_len: usize,

    // -------------------------------------------------------------------------
    // Count Limits
    // -------------------------------------------------------------------------
    /// Max number of tag entries in one event
    pub max_tags: usize,

    /// Max number of strings in one tag entry
    pub max_tag_values: usize,

    // -------------------------------------------------------------------------
    // Framing Limits
    // -------------------------------------------------------------------------
    /// Max length of one framed record read from a stream
    pub max_record_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_content_len: 512 * 1024,  // 512 KB
            max_tag_value_len: 64 * 1024, // 64 KB
            max_tags: 10_000,
            max_tag_values: 1_024,
            max_record_len: 1024 * 1024, // 1 MB
        }
    }
}

impl DecodeLimits {
    /// Create a new limits builder
    pub fn builder() -> DecodeLimitsBuilder {
        DecodeLimitsBuilder::default()
    }

    /// Limits that only stop at what the varint can express.
    ///
    /// Declared lengths are still checked against the bytes actually
    /// present, so this is safe on trusted input only in the sense of
    /// allocation size, not correctness.
    pub fn unbounded() -> Self {
        let max = layout::MAX_VARINT as usize;
        Self {
            max_content_len: max,
            max_tag_value_len: max,
            max_tags: max,
            max_tag_values: max,
            max_record_len: max,
        }
    }
}

/// Builder for DecodeLimits
#[derive(Default)]
pub struct DecodeLimitsBuilder {
    limits: DecodeLimits,
}

impl DecodeLimitsBuilder {
    /// Set the max content length (in bytes)
    pub fn max_content_len(mut self, len: usize) -> Self {
        self.limits.max_content_len = len;
        self
    }

    /// Set the max length of one tag string (in bytes)
    pub fn max_tag_value_len(mut self, len: usize) -> Self {
        self.limits.max_tag_value_len = len;
        self
    }

    /// Set the max number of tag entries
    pub fn max_tags(mut self, count: usize) -> Self {
        self.limits.max_tags = count;
        self
    }

    /// Set the max number of strings per tag entry
    pub fn max_tag_values(mut self, count: usize) -> Self {
        self.limits.max_tag_values = count;
        self
    }

    /// Set the max framed record length (in bytes)
    pub fn max_record_len(mut self, len: usize) -> Self {
        self.limits.max_record_len = len;
        self
    }

    pub fn build(self) -> Result<DecodeLimits> {
        if self.limits.max_record_len < layout::MIN_RECORD_LEN {
            return Err(EventBinError::Config(format!(
                "max_record_len {} is below the minimum record size {}",
                self.limits.max_record_len,
                layout::MIN_RECORD_LEN
            )));
        }
        Ok(self.limits)
    }
}
