//! Short logged float compression
//!
//! Each value is stored as `ln(v + 1)` scaled by the fixed point and rounded
//! into an unsigned 16-bit integer, which keeps a constant relative error
//! across the wide dynamic range of intensities.
//!
//! Layout: fixed point (8 bytes, big-endian f64), then one little-endian
//! `u16` per value.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::config::Numpress;
use crate::error::{CodecError, Result};

const HEADER_LEN: usize = 8;

/// Largest fixed point that keeps every scaled logarithm within `u16`
pub fn optimal_fixed_point(values: &[f64]) -> f64 {
    let max_log = values
        .iter()
        .fold(1.0f64, |acc, &v| acc.max((v + 1.0).ln()));
    (u16::MAX as f64 / max_log).floor()
}

/// Encode non-negative values with the given fixed point
pub fn encode(values: &[f64], fixed_point: f64) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let mut out = vec![0u8; HEADER_LEN + values.len() * 2];
    BigEndian::write_f64(&mut out[..HEADER_LEN], fixed_point);

    for (slot, &value) in out[HEADER_LEN..].chunks_exact_mut(2).zip(values) {
        let scaled = ((value + 1.0).ln() * fixed_point + 0.5).floor();
        if !(0.0..=u16::MAX as f64).contains(&scaled) {
            return Err(CodecError::NumpressOverflow {
                numpress: Numpress::Slof,
                fixed_point,
            });
        }
        LittleEndian::write_u16(slot, scaled as u16);
    }

    Ok(out)
}

/// Decode a short logged float stream
pub fn decode(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.is_empty() || bytes.len() == HEADER_LEN {
        return Ok(Vec::new());
    }
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::CorruptNumpress(
            "not enough bytes to read the fixed point".to_string(),
        ));
    }
    if (bytes.len() - HEADER_LEN) % 2 != 0 {
        return Err(CodecError::CorruptNumpress(format!(
            "odd payload length {}",
            bytes.len() - HEADER_LEN
        )));
    }

    let fixed_point = BigEndian::read_f64(&bytes[..HEADER_LEN]);
    if !(fixed_point.is_finite() && fixed_point > 0.0) {
        return Err(CodecError::CorruptNumpress(format!(
            "invalid fixed point {fixed_point}"
        )));
    }

    Ok(bytes[HEADER_LEN..]
        .chunks_exact(2)
        .map(|c| (LittleEndian::read_u16(c) as f64 / fixed_point).exp() - 1.0)
        .collect())
}
