//! Codec Tests
//!
//! Encoding and decoding of single records.

mod common;

use common::{empty_event, sample_event};
use eventbin::codec::layout::{HEADER_LEN, MIN_RECORD_LEN, SIG_LEN};
use eventbin::codec::varint::write_var_uint;
use eventbin::{
    decode, decode_with_limits, encode, encode_into, encoded_len, peek_header, DecodeError,
    DecodeLimits, Field, Tag,
};

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_empty_event_is_header_only() {
    let event = empty_event();
    let encoded = encode(&event);

    assert_eq!(encoded.len(), 32 + 32 + 8 + 2 + 1 + 1 + 64);
    assert_eq!(encoded.len(), MIN_RECORD_LEN);
    assert_eq!(&encoded[..32], &[0x11; 32]);
    assert_eq!(&encoded[32..64], &[0x22; 32]);
    assert_eq!(&encoded[64..72], &1_700_000_000i64.to_be_bytes());
    assert_eq!(&encoded[72..74], &[0x00, 0x01]);
    assert_eq!(encoded[74], 0x00, "zero tag count");
    assert_eq!(encoded[75], 0x00, "zero content length");
    assert_eq!(&encoded[76..], &[0x33; 64]);

    assert_eq!(decode(&encoded).unwrap(), event);
}

#[test]
fn test_two_tags_with_empty_entry() {
    let mut event = empty_event();
    let target = "a1".repeat(32);
    event.tags = vec![Tag::new(["e", target.as_str()]), Tag::default()];

    let decoded = decode(&encode(&event)).unwrap();

    assert_eq!(decoded.tags.len(), 2);
    assert_eq!(decoded.tags[0].values(), &["e".to_string(), target]);
    assert!(decoded.tags[1].is_empty());
    assert_eq!(decoded, event);
}

#[test]
fn test_round_trip_sample() {
    let event = sample_event();
    let encoded = encode(&event);
    let decoded = decode(&encoded).unwrap();

    assert_eq!(decoded, event);
    assert_eq!(encode(&decoded), encoded);
}

#[test]
fn test_round_trip_extreme_integers() {
    let mut event = empty_event();
    event.created_at = -1;
    event.kind = u16::MAX;
    let encoded = encode(&event);
    assert_eq!(&encoded[64..72], &[0xff; 8]);
    assert_eq!(&encoded[72..74], &[0xff, 0xff]);
    assert_eq!(decode(&encoded).unwrap(), event);

    event.created_at = i64::MIN;
    event.kind = 0;
    assert_eq!(decode(&encode(&event)).unwrap(), event);
}

#[test]
fn test_content_carried_raw() {
    let mut event = empty_event();
    event.content = "tab\t nul\0 quote\" emoji 🦀 \u{7f}".to_string();
    let encoded = encode(&event);

    let start = HEADER_LEN + 1 + 1;
    assert_eq!(&encoded[start..start + event.content.len()], event.content.as_bytes());
    assert_eq!(decode(&encoded).unwrap().content, event.content);
}

#[test]
fn test_long_content_uses_multibyte_length() {
    let mut event = empty_event();
    event.content = "x".repeat(300);
    let encoded = encode(&event);

    assert_eq!(&encoded[HEADER_LEN + 1..HEADER_LEN + 3], &[0xac, 0x02]);
    assert_eq!(decode(&encoded).unwrap(), event);
}

#[test]
fn test_encoded_len_is_exact() {
    for event in [empty_event(), sample_event()] {
        assert_eq!(encoded_len(&event), encode(&event).len());
    }
}

#[test]
fn test_encode_into_appends() {
    let event = sample_event();
    let mut buf = vec![0xee, 0xee];
    encode_into(&event, &mut buf);

    assert_eq!(&buf[..2], &[0xee, 0xee]);
    assert_eq!(&buf[2..], encode(&event).as_slice());
}

#[test]
fn test_encode_into_bytes_mut() {
    let event = sample_event();
    let mut buf = bytes::BytesMut::new();
    encode_into(&event, &mut buf);
    assert_eq!(decode(&buf).unwrap(), event);
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_every_prefix_is_truncated() {
    let encoded = encode(&sample_event());
    for k in 0..encoded.len() {
        match decode(&encoded[..k]) {
            Err(DecodeError::TruncatedInput { .. }) => {}
            other => panic!("prefix {} gave {:?}", k, other),
        }
    }
}

#[test]
fn test_trailing_byte_rejected() {
    let mut encoded = encode(&sample_event());
    encoded.push(0x00);
    assert_eq!(
        decode(&encoded).unwrap_err(),
        DecodeError::TrailingData { remaining: 1 }
    );
}

#[test]
fn test_invalid_utf8_content() {
    let mut event = empty_event();
    event.content = "a".to_string();
    let mut encoded = encode(&event);

    let content_byte = encoded.len() - SIG_LEN - 1;
    assert_eq!(encoded[content_byte], b'a');
    encoded[content_byte] = 0x80;

    assert_eq!(
        decode(&encoded).unwrap_err(),
        DecodeError::InvalidUtf8 {
            field: Field::Content,
            valid_up_to: 0
        }
    );
}

#[test]
fn test_invalid_utf8_tag_value() {
    let mut event = empty_event();
    event.tags = vec![Tag::new(["p"])];
    let mut encoded = encode(&event);

    // tag count, arity, length, then the value byte
    let value_byte = HEADER_LEN + 3;
    assert_eq!(encoded[value_byte], b'p');
    encoded[value_byte] = 0xff;

    assert!(matches!(
        decode(&encoded).unwrap_err(),
        DecodeError::InvalidUtf8 {
            field: Field::TagValue,
            ..
        }
    ));
}

#[test]
fn test_content_over_limit_is_overflow() {
    let mut event = empty_event();
    event.content = "hello".to_string();
    let encoded = encode(&event);

    let limits = DecodeLimits::builder().max_content_len(4).build().unwrap();
    assert_eq!(
        decode_with_limits(&encoded, &limits).unwrap_err(),
        DecodeError::Overflow {
            field: Field::Content,
            declared: 5,
            limit: 4
        }
    );
    assert!(decode_with_limits(&encoded, &DecodeLimits::default()).is_ok());
}

#[test]
fn test_huge_declared_content_is_overflow() {
    let mut bytes = encode(&empty_event())[..HEADER_LEN].to_vec();
    bytes.push(0x00);
    write_var_uint(&mut bytes, u32::MAX as u64);

    assert!(matches!(
        decode(&bytes).unwrap_err(),
        DecodeError::Overflow {
            field: Field::Content,
            ..
        }
    ));
}

#[test]
fn test_varint_beyond_u32_is_overflow() {
    let mut bytes = encode(&empty_event())[..HEADER_LEN].to_vec();
    bytes.extend_from_slice(&[0x80, 0x80, 0x80, 0x80, 0x80, 0x01]);

    assert!(matches!(
        decode_with_limits(&bytes, &DecodeLimits::unbounded()).unwrap_err(),
        DecodeError::Overflow {
            field: Field::TagCount,
            ..
        }
    ));
}

#[test]
fn test_huge_tag_count_does_not_allocate_up_front() {
    let mut bytes = encode(&empty_event())[..HEADER_LEN].to_vec();
    write_var_uint(&mut bytes, u32::MAX as u64);

    assert!(matches!(
        decode_with_limits(&bytes, &DecodeLimits::unbounded()).unwrap_err(),
        DecodeError::TruncatedInput {
            field: Field::TagValueCount,
            ..
        }
    ));
}

#[test]
fn test_tag_limits() {
    let mut event = empty_event();
    event.tags = vec![Tag::new(["a", "b", "c"]), Tag::new(["d"])];
    let encoded = encode(&event);

    let few_tags = DecodeLimits::builder().max_tags(1).build().unwrap();
    assert!(matches!(
        decode_with_limits(&encoded, &few_tags).unwrap_err(),
        DecodeError::Overflow { field: Field::TagCount, declared: 2, limit: 1 }
    ));

    let narrow = DecodeLimits::builder().max_tag_values(2).build().unwrap();
    assert!(matches!(
        decode_with_limits(&encoded, &narrow).unwrap_err(),
        DecodeError::Overflow { field: Field::TagValueCount, declared: 3, limit: 2 }
    ));

    let mut long = empty_event();
    long.tags = vec![Tag::new(["r", "https://example.com/a/long/path"])];
    let short_values = DecodeLimits::builder().max_tag_value_len(8).build().unwrap();
    assert!(matches!(
        decode_with_limits(&encode(&long), &short_values).unwrap_err(),
        DecodeError::Overflow { field: Field::TagValue, .. }
    ));
}

#[test]
fn test_truncation_names_field() {
    let encoded = encode(&empty_event());
    assert!(matches!(
        decode(&encoded[..40]).unwrap_err(),
        DecodeError::TruncatedInput { field: Field::Pubkey, needed: 32, available: 8 }
    ));
    assert!(matches!(
        decode(&encoded[..encoded.len() - 1]).unwrap_err(),
        DecodeError::TruncatedInput { field: Field::Sig, needed: 64, available: 63 }
    ));
}

// =============================================================================
// Header Peek Tests
// =============================================================================

#[test]
fn test_peek_header_reads_fixed_fields_only() {
    let event = sample_event();
    let encoded = encode(&event);

    let header = peek_header(&encoded[..HEADER_LEN]).unwrap();
    assert_eq!(header.id, event.id);
    assert_eq!(header.pubkey, event.pubkey);
    assert_eq!(header.created_at, event.created_at);
    assert_eq!(header.kind, event.kind);

    assert_eq!(peek_header(&encoded).unwrap(), header);
    assert!(matches!(
        peek_header(&encoded[..HEADER_LEN - 1]).unwrap_err(),
        DecodeError::TruncatedInput { field: Field::Kind, .. }
    ));
}

// =============================================================================
// Limits Tests
// =============================================================================

#[test]
fn test_limits_reject_tiny_record_len() {
    assert!(DecodeLimits::builder().max_record_len(10).build().is_err());
    assert!(DecodeLimits::builder().max_record_len(MIN_RECORD_LEN).build().is_ok());
}
