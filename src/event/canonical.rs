//! Canonical text form
//!
//! The id of an event is the SHA-256 of
//! `[0,"<pubkey hex>",created_at,kind,tags,"content"]` serialized as compact
//! JSON. serde_json escapes exactly the characters the canonical form
//! requires (`"`, `\`, and control characters), so its output is used as-is.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::{Event, EventId, PublicKey, Tag};

#[derive(Serialize)]
struct CanonicalForm<'a>(u8, &'a PublicKey, i64, u16, &'a [Tag], &'a str);

/// Canonical JSON over which the id is computed
pub fn canonical_json(event: &Event) -> String {
    let form = CanonicalForm(
        0,
        &event.pubkey,
        event.created_at,
        event.kind,
        &event.tags,
        &event.content,
    );
    // Serializing strings, integers and string arrays cannot fail
    serde_json::to_string(&form).unwrap_or_default()
}

/// SHA-256 of the canonical form
pub fn compute_id(event: &Event) -> EventId {
    let digest = Sha256::digest(canonical_json(event).as_bytes());
    EventId(digest.into())
}
