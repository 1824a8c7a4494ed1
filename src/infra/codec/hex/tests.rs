//! Unit tests for fixed-width hex decoding and encoding.
use super::*;

#[test]
/// Digits are accumulated most significant first, in either case.
fn test_decode_mixed_case() {
    assert_eq!(decode_hex(b"1aF", 3), Ok(0x1AF));
    assert_eq!(decode_hex(b"1ABCDEF0", 8), Ok(0x1ABC_DEF0));
    assert_eq!(decode_hex(b"ffffffff", 8), Ok(u32::MAX));
}

#[test]
/// Only `count` digits are consumed; trailing bytes are left alone.
fn test_decode_ignores_trailing_bytes() {
    assert_eq!(decode_hex(b"12zz", 2), Ok(0x12));
    assert_eq!(decode_hex(b"", 0), Ok(0));
}

#[test]
/// A non-hex byte inside the field is rejected.
fn test_decode_invalid_digit() {
    assert_eq!(decode_hex(b"1G3", 3), Err(ParseError::InvalidDigit));
    assert_eq!(decode_hex(b" 1", 2), Err(ParseError::InvalidDigit));
}

#[test]
/// End of input or NUL before the field completes is a truncation.
fn test_decode_truncated() {
    assert_eq!(decode_hex(b"12", 3), Err(ParseError::Truncated));
    assert_eq!(decode_hex(b"1\0", 2), Err(ParseError::Truncated));
    assert_eq!(decode_hex(b"", 1), Err(ParseError::Truncated));
}

#[test]
/// Encoding keeps only the low nibbles and always emits uppercase.
fn test_encode_fixed_width() {
    assert_eq!(&encode_hex::<3>(0x123), b"123");
    assert_eq!(&encode_hex::<3>(0xABCD), b"BCD");
    assert_eq!(&encode_hex::<8>(0x1F), b"0000001F");
    assert_eq!(&encode_hex::<1>(0xA), b"A");
    assert_eq!(&encode_hex_byte(0x5C), b"5C");
}

#[test]
/// Every width decodes back what it encoded for values that fit.
fn test_round_trip_boundaries() {
    for width_value in [0u32, 1, 0x7FF, 0x1FFF_FFFF, u32::MAX] {
        let encoded = encode_hex::<8>(width_value);
        assert_eq!(decode_hex(&encoded, 8), Ok(width_value));
    }
    let encoded = encode_hex::<4>(0xBEEF);
    assert_eq!(decode_hex(&encoded, 4), Ok(0xBEEF));
}

#[test]
/// Nibble helper covers both digit ranges.
fn test_hex_digit() {
    assert_eq!(hex_digit(0), b'0');
    assert_eq!(hex_digit(9), b'9');
    assert_eq!(hex_digit(10), b'A');
    assert_eq!(hex_digit(0x1F), b'F');
    assert_eq!(digit_value(b'e'), Some(14));
    assert_eq!(digit_value(b'g'), None);
}
