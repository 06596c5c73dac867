//! Linear prediction
//!
//! Each value is scaled by the fixed point and rounded to an integer. The
//! first two integers are stored verbatim; every later one is stored as its
//! difference from the straight-line extrapolation of the previous two, in
//! half-byte integer coding. Smooth, increasing series such as m/z arrays
//! leave tiny residuals.
//!
//! Layout: fixed point (8 bytes, big-endian f64), first and second integer
//! (4 bytes each, little-endian), residual half bytes. The stream itself is
//! produced and read by the `numpress` crate.

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::config::Numpress;
use crate::error::{CodecError, Result};

const HEADER_LEN: usize = 8;

/// Upper bound for a derived fixed point, keeps `value * fixed_point` finite
const MAX_FIXED_POINT: f64 = 1.0e150;

/// Largest fixed point that keeps every stored integer and residual inside
/// the 32-bit range for these values.
///
/// Non-negative arrays take the scaling `numpress` derives. Arrays with
/// negative values, all-zero arrays and magnitudes outside that scaling's
/// range fall back to a bound on absolute values.
pub fn optimal_fixed_point(values: &[f64]) -> f64 {
    if values.iter().all(|v| *v >= 0.0) {
        let scaling = numpress::optimal_scaling(values);
        if scaling.is_finite() && scaling > 0.0 {
            return scaling.min(MAX_FIXED_POINT);
        }
    }

    let first_two = values.iter().take(2).fold(0.0f64, |acc, v| acc.max(v.abs()));
    let max_magnitude = values.windows(3).fold(first_two, |acc, w| {
        let extrapolated = w[1] + (w[1] - w[0]);
        let residual = w[2] - extrapolated;
        acc.max((residual.abs() + 1.0).ceil())
    });

    if max_magnitude <= 0.0 {
        return i32::MAX as f64;
    }
    let fixed_point = (i32::MAX as f64 / max_magnitude).min(MAX_FIXED_POINT);
    // very large magnitudes need a fractional scale
    if fixed_point >= 1.0 {
        fixed_point.floor()
    } else {
        fixed_point
    }
}

/// Encode values with the given fixed point
pub fn encode(values: &[f64], fixed_point: f64) -> Result<Vec<u8>> {
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let overflow = CodecError::NumpressOverflow {
        numpress: Numpress::Linear,
        fixed_point,
    };

    let fits = |value: &f64| {
        let scaled = (value * fixed_point + 0.5).floor();
        scaled.is_finite() && scaled.abs() <= i32::MAX as f64
    };
    if !values.iter().all(fits) {
        return Err(overflow);
    }

    // residuals are range checked by the encoder itself
    numpress::numpress_compress(values, fixed_point).map_err(|e| {
        debug!("numpress linear rejected fixed point {}: {}", fixed_point, e);
        overflow
    })
}

/// Decode a linear prediction stream
pub fn decode(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.is_empty() || bytes.len() == HEADER_LEN {
        return Ok(Vec::new());
    }
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::CorruptNumpress(
            "not enough bytes to read the fixed point".to_string(),
        ));
    }

    let fixed_point = BigEndian::read_f64(&bytes[..HEADER_LEN]);
    if !(fixed_point.is_finite() && fixed_point > 0.0) {
        return Err(CodecError::CorruptNumpress(format!(
            "invalid fixed point {fixed_point}"
        )));
    }

    match bytes.len() - HEADER_LEN {
        1..=3 => {
            return Err(CodecError::CorruptNumpress(
                "not enough bytes to read the first value".to_string(),
            ))
        }
        5..=7 => {
            return Err(CodecError::CorruptNumpress(
                "not enough bytes to read the second value".to_string(),
            ))
        }
        _ => {}
    }

    numpress::numpress_decompress(bytes).map_err(|e| CodecError::CorruptNumpress(e.to_string()))
}
