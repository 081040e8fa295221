//! Shared fixtures for integration tests

#![allow(dead_code)]

use eventbin::event::compute_id;
use eventbin::{Event, EventId, PublicKey, Signature, Tag};

/// Event with no tags and empty content
pub fn empty_event() -> Event {
    Event {
        id: EventId([0x11; 32]),
        pubkey: PublicKey([0x22; 32]),
        created_at: 1_700_000_000,
        kind: 1,
        tags: vec![],
        content: String::new(),
        sig: Signature([0x33; 64]),
    }
}

/// Event with a reply tag, an empty tag, and a multi-line body
pub fn sample_event() -> Event {
    let mut event = Event {
        id: EventId([0; 32]),
        pubkey: PublicKey([0xab; 32]),
        created_at: 1_712_345_678,
        kind: 1,
        tags: vec![
            Tag::new(["e".to_string(), "5c".repeat(32)]),
            Tag::default(),
            Tag::new(["t", "nostr"]),
        ],
        content: "gm ☕\nsecond line with \"quotes\" and \\ backslash".to_string(),
        sig: Signature([0xcd; 64]),
    };
    event.id = compute_id(&event);
    event
}
