//! Fixed-width ASCII hexadecimal fields, most significant digit first.
//! SLCAN never uses separators or variable widths: every field has a width
//! known in advance, so both directions work on an exact digit count.
use crate::error::ParseError;

/// Widest field that fits in a `u32` accumulator (extended identifiers).
pub const MAX_HEX_DIGITS: usize = 8;

/// Value of a single ASCII hex digit, case-insensitive.
#[inline]
pub fn digit_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Uppercase ASCII digit for the low nibble of `nibble`.
#[inline]
pub const fn hex_digit(nibble: u8) -> u8 {
    let nibble = nibble & 0x0F;
    if nibble > 9 {
        nibble - 10 + b'A'
    } else {
        nibble + b'0'
    }
}

/// Decode exactly `count` hex digits from the start of `bytes`.
///
/// A NUL byte or the end of the slice before `count` digits yields
/// [`ParseError::Truncated`]; any other non-hex byte yields
/// [`ParseError::InvalidDigit`]. Bytes after the field are not inspected.
pub fn decode_hex(bytes: &[u8], count: usize) -> Result<u32, ParseError> {
    debug_assert!(count <= MAX_HEX_DIGITS);

    let mut value: u32 = 0;
    for index in 0..count {
        let byte = match bytes.get(index) {
            None | Some(0) => return Err(ParseError::Truncated),
            Some(&byte) => byte,
        };
        let digit = digit_value(byte).ok_or(ParseError::InvalidDigit)?;
        value = (value << 4) | digit as u32;
    }
    Ok(value)
}

/// Decode a two-digit field into a byte.
#[inline]
pub fn decode_hex_byte(bytes: &[u8]) -> Result<u8, ParseError> {
    decode_hex(bytes, 2).map(|value| value as u8)
}

/// Encode the low `4 * N` bits of `value` as `N` uppercase hex digits.
pub fn encode_hex<const N: usize>(value: u32) -> [u8; N] {
    let mut out = [b'0'; N];
    let mut remaining = value;
    for slot in out.iter_mut().rev() {
        *slot = hex_digit(remaining as u8);
        remaining >>= 4;
    }
    out
}

/// Two uppercase digits for one byte, high nibble first.
#[inline]
pub const fn encode_hex_byte(value: u8) -> [u8; 2] {
    [hex_digit(value >> 4), hex_digit(value)]
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
