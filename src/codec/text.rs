//! Base64 text transport
//!
//! Encoded arrays travel as XML character data. Writers emit the standard
//! alphabet with padding and no line breaks; readers accept whitespace and
//! newlines anywhere in the text, since hand-formatted and pretty-printed
//! documents wrap long Base64 runs.

use base64::prelude::*;

use crate::error::Result;

/// Encode bytes as standard, padded Base64
pub fn to_text(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    BASE64_STANDARD.encode(bytes)
}

/// Decode Base64 text, discarding embedded ASCII whitespace.
///
/// Any other character outside the alphabet, or bad padding, is an
/// [`InvalidEncoding`](crate::error::CodecError::InvalidEncoding) error.
pub fn from_text(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.bytes().any(|b| b.is_ascii_whitespace()) {
        let clean = remove_whitespace(trimmed.as_bytes());
        decode_clean(&clean)
    } else {
        decode_clean(trimmed.as_bytes())
    }
}

#[cfg(not(feature = "simd"))]
fn remove_whitespace(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect()
}

#[cfg(feature = "simd")]
fn remove_whitespace(bytes: &[u8]) -> Vec<u8> {
    super::simd::simd_remove_whitespace_bytes(bytes)
}

#[cfg(not(feature = "simd"))]
fn decode_clean(bytes: &[u8]) -> Result<Vec<u8>> {
    Ok(BASE64_STANDARD.decode(bytes)?)
}

#[cfg(feature = "simd")]
fn decode_clean(bytes: &[u8]) -> Result<Vec<u8>> {
    super::simd::simd_decode_base64(bytes)
}
