//! Base-62 encoding of numeric ids
//!
//! Converts between a non-negative integer and a compact textual code using
//! the alphabet `0-9`, `A-Z`, `a-z` (positions 0 to 61, in that order).
//! The ordering is part of the public code format: changing it would change
//! every code ever handed out.

use thiserror::Error;

/// Symbols of the encoding, indexed by digit value
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Numeric base of the encoding
pub const BASE: u64 = 62;

/// Errors produced while decoding a base-62 string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input contains a character outside the alphabet
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    /// The decoded value does not fit in 64 bits
    #[error("encoded value exceeds the 64-bit range")]
    Overflow,
}

/// Encodes a number as a base-62 string
///
/// `0` encodes to `"0"`; every other value produces the shortest string
/// without leading zeros.
///
/// # Example
///
/// ```
/// # use shortener::codec::encode;
/// assert_eq!(encode(123456789), "8M0kX");
/// ```
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    // u64::MAX needs 11 digits
    let mut digits = Vec::with_capacity(11);
    while n > 0 {
        digits.push(ALPHABET[(n % BASE) as usize]);
        n /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Decodes a base-62 string back into a number
///
/// The empty string decodes to `0`. Characters outside the alphabet and
/// values wider than 64 bits are rejected instead of producing a wrong number.
///
/// # Example
///
/// ```
/// # use shortener::codec::decode;
/// assert_eq!(decode("8M0kX"), Ok(123456789));
/// assert!(decode("8M-kX").is_err());
/// ```
pub fn decode(code: &str) -> Result<u64, CodecError> {
    code.chars()
        .enumerate()
        .try_fold(0u64, |acc, (position, character)| {
            let digit = digit_value(character)
                .ok_or(CodecError::InvalidCharacter { character, position })?;

            acc.checked_mul(BASE)
                .and_then(|value| value.checked_add(digit))
                .ok_or(CodecError::Overflow)
        })
}

/// Position of `c` in the alphabet
fn digit_value(c: char) -> Option<u64> {
    let value = match c {
        '0'..='9' => c as u64 - '0' as u64,
        'A'..='Z' => c as u64 - 'A' as u64 + 10,
        'a'..='z' => c as u64 - 'a' as u64 + 36,
        _ => return None,
    };
    Some(value)
}
