//! MS-Numpress numerical compression
//!
//! Three lossy transforms that replace fixed-width packing:
//!
//! - [`Numpress::Linear`]: fixed point plus linear prediction, for m/z and
//!   retention time arrays;
//! - [`Numpress::Pic`]: rounding to integers, for ion counts;
//! - [`Numpress::Slof`]: fixed point on `ln(v + 1)`, for intensities.
//!
//! [`encode`] enforces the error tolerance: starting from the requested fixed
//! point (or the most precise safe one), it encodes, decodes, and doubles the
//! fixed point until the worst relative error fits or no larger fixed point
//! is safe.

mod half_bytes;
pub mod linear;
pub mod pic;
pub mod slof;

use log::trace;

use crate::config::Numpress;
use crate::error::{CodecError, Result};

/// Numpress bytes together with the fixed point that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct NumpressEncoded {
    /// Encoded byte stream, self-describing for its variant
    pub bytes: Vec<u8>,
    /// Fixed point actually used (0 for pic, which has none)
    pub fixed_point: f64,
}

/// Whether the variant embeds a fixed point in its stream
pub fn has_fixed_point(numpress: Numpress) -> bool {
    matches!(numpress, Numpress::Linear | Numpress::Slof)
}

/// Most precise fixed point that cannot overflow for these values
pub fn optimal_fixed_point(numpress: Numpress, values: &[f64]) -> Option<f64> {
    match numpress {
        Numpress::Linear => Some(linear::optimal_fixed_point(values)),
        Numpress::Slof => Some(slof::optimal_fixed_point(values)),
        Numpress::None | Numpress::Pic => None,
    }
}

/// Reject values the variant cannot represent
pub fn check_values(values: &[f64], numpress: Numpress) -> Result<()> {
    let allows_negative = matches!(numpress, Numpress::Linear);
    match values
        .iter()
        .position(|v| !v.is_finite() || (!allows_negative && *v < 0.0))
    {
        Some(index) => Err(CodecError::InvalidValue {
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Worst `abs(1 - decoded/original)` over nonzero originals.
///
/// A zero that does not decode to exactly zero, or a length mismatch,
/// counts as an infinite error.
pub fn max_relative_error(original: &[f64], decoded: &[f64]) -> f64 {
    if original.len() != decoded.len() {
        return f64::INFINITY;
    }
    original
        .iter()
        .zip(decoded)
        .fold(0.0f64, |worst, (&o, &d)| {
            let error = if o == 0.0 {
                if d == 0.0 {
                    0.0
                } else {
                    f64::INFINITY
                }
            } else {
                (1.0 - d / o).abs()
            };
            worst.max(error)
        })
}

fn encode_once(values: &[f64], numpress: Numpress, fixed_point: f64) -> Result<Vec<u8>> {
    match numpress {
        Numpress::Linear => linear::encode(values, fixed_point),
        Numpress::Pic => pic::encode(values),
        Numpress::Slof => slof::encode(values, fixed_point),
        Numpress::None => Err(CodecError::ConfigurationInconsistent(
            "numpress encode requested without a numpress variant".to_string(),
        )),
    }
}

/// Encode values with a numpress variant.
///
/// `requested_fixed_point` of 0 derives the most precise safe fixed point.
/// `tolerance` of 0 encodes once without checking the error.
pub fn encode(
    values: &[f64],
    numpress: Numpress,
    requested_fixed_point: f64,
    tolerance: f64,
) -> Result<NumpressEncoded> {
    check_values(values, numpress)?;

    if values.is_empty() {
        return Ok(NumpressEncoded {
            bytes: Vec::new(),
            fixed_point: requested_fixed_point,
        });
    }

    let ceiling = optimal_fixed_point(numpress, values);
    let mut fixed_point = match ceiling {
        Some(ceiling) if requested_fixed_point <= 0.0 => ceiling,
        Some(_) => requested_fixed_point,
        None => 0.0,
    };

    loop {
        let bytes = encode_once(values, numpress, fixed_point)?;
        if tolerance <= 0.0 {
            return Ok(NumpressEncoded { bytes, fixed_point });
        }

        let decoded = decode(numpress, &bytes)?;
        let max_error = max_relative_error(values, &decoded);
        trace!(
            "numpress {} fixed point {} worst relative error {:e}",
            numpress,
            fixed_point,
            max_error
        );
        if max_error <= tolerance {
            return Ok(NumpressEncoded { bytes, fixed_point });
        }

        match ceiling {
            Some(ceiling) if fixed_point < ceiling => {
                fixed_point = (fixed_point * 2.0).min(ceiling);
            }
            _ => {
                return Err(CodecError::NumpressToleranceUnattainable {
                    numpress,
                    tolerance,
                    max_error,
                })
            }
        }
    }
}

/// Decode a numpress stream
pub fn decode(numpress: Numpress, bytes: &[u8]) -> Result<Vec<f64>> {
    match numpress {
        Numpress::Linear => linear::decode(bytes),
        Numpress::Pic => pic::decode(bytes),
        Numpress::Slof => slof::decode(bytes),
        Numpress::None => Err(CodecError::ConfigurationInconsistent(
            "numpress decode requested without a numpress variant".to_string(),
        )),
    }
}
