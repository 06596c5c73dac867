//! SIMD-accelerated text transport
//!
//! Whitespace stripping with 16-byte vectors and Base64 decoding through
//! `base64-simd`. Gated behind the `simd` feature; results are identical to
//! the scalar path.

use base64_simd::STANDARD as BASE64_SIMD;
use wide::u8x16;

use crate::error::{CodecError, Result};

/// Decode whitespace-free Base64 with the SIMD engine
pub fn simd_decode_base64(bytes: &[u8]) -> Result<Vec<u8>> {
    BASE64_SIMD
        .decode_to_vec(bytes)
        .map_err(|e| CodecError::InvalidEncodingText(e.to_string()))
}

/// Bytes `u8::is_ascii_whitespace` accepts
const WHITESPACE: [u8; 5] = [b' ', b'\t', b'\n', 0x0c, b'\r'];

/// Strip ASCII whitespace 16 bytes at a time
///
/// Chunks without whitespace are copied whole; the rest are filtered lane by
/// lane, and the tail goes through the scalar check.
pub fn simd_remove_whitespace_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut kept = Vec::with_capacity(bytes.len());
    let blanks = WHITESPACE.map(u8x16::splat);

    let mut chunks = bytes.chunks_exact(16);
    for chunk in &mut chunks {
        let mut lanes = [0u8; 16];
        lanes.copy_from_slice(chunk);
        let block = u8x16::from(lanes);

        let hits = blanks
            .iter()
            .fold(u8x16::splat(0), |acc, blank| acc | block.cmp_eq(*blank));
        let flags: [u8; 16] = hits.into();

        if flags.iter().all(|&f| f == 0) {
            kept.extend_from_slice(chunk);
        } else {
            kept.extend(
                lanes
                    .iter()
                    .zip(flags)
                    .filter(|(_, flag)| *flag == 0)
                    .map(|(byte, _)| *byte),
            );
        }
    }

    kept.extend(
        chunks
            .remainder()
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace()),
    );
    kept
}
