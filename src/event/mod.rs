//! Event Module
//!
//! In-memory form of a signed event record, plus its JSON text form.
//!
//! ## JSON Form
//! ```json
//! {
//!   "id": "<64 hex>",
//!   "pubkey": "<64 hex>",
//!   "created_at": 1700000000,
//!   "kind": 1,
//!   "tags": [["e", "<64 hex>"], ["t", "news"]],
//!   "content": "hello",
//!   "sig": "<128 hex>"
//! }
//! ```

mod canonical;
mod verify;

pub use canonical::{canonical_json, compute_id};
pub use verify::{verify_event, SignatureVerifier};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EventBinError, Result, VerifyError};

/// Declares a fixed-size binary field with a lowercase hex text form.
macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Size in bytes
            pub const LEN: usize = $len;

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = EventBinError;

            fn from_str(s: &str) -> Result<Self> {
                let mut bytes = [0u8; $len];
                hex::decode_to_slice(s, &mut bytes).map_err(|e| EventBinError::Hex {
                    field: $field,
                    reason: e.to_string(),
                })?;
                Ok(Self(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// 32-byte SHA-256 of the canonical form
    EventId, 32, "id"
);
fixed_bytes!(
    /// 32-byte x-only author public key
    PublicKey, 32, "pubkey"
);
fixed_bytes!(
    /// 64-byte Schnorr signature over the event id
    Signature, 64, "sig"
);

/// One tag entry: an ordered list of strings.
///
/// The first string conventionally names the tag (`e`, `p`, `t`, ...) but
/// any arity is valid, including zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub Vec<String>);

impl Tag {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Tag name (first value), if any
    pub fn name(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A signed event record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Content-derived identifier
    pub id: EventId,

    /// Author
    pub pubkey: PublicKey,

    /// Unix timestamp (seconds)
    pub created_at: i64,

    /// Event type discriminator
    pub kind: u16,

    /// Ordered tag entries
    pub tags: Vec<Tag>,

    /// Arbitrary UTF-8 body
    pub content: String,

    /// Signature over `id`
    pub sig: Signature,
}

/// JSON shape accepted on ingestion; `kind` is range-checked afterwards
#[derive(Deserialize)]
struct RawEvent {
    id: EventId,
    pubkey: PublicKey,
    created_at: i64,
    kind: u64,
    #[serde(default)]
    tags: Vec<Tag>,
    #[serde(default)]
    content: String,
    sig: Signature,
}

impl TryFrom<RawEvent> for Event {
    type Error = EventBinError;

    fn try_from(raw: RawEvent) -> Result<Self> {
        let kind = u16::try_from(raw.kind).map_err(|_| EventBinError::KindOutOfRange(raw.kind))?;
        Ok(Self {
            id: raw.id,
            pubkey: raw.pubkey,
            created_at: raw.created_at,
            kind,
            tags: raw.tags,
            content: raw.content,
            sig: raw.sig,
        })
    }
}

impl Event {
    /// Parse an event from its JSON text form
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawEvent = serde_json::from_str(json)?;
        raw.try_into()
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check that `id` is the hash of the canonical form
    pub fn verify_id(&self) -> std::result::Result<(), VerifyError> {
        let computed = compute_id(self);
        if computed != self.id {
            return Err(VerifyError::IdMismatch {
                expected: self.id,
                computed,
            });
        }
        Ok(())
    }
}
