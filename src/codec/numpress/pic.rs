//! Positive integer compression
//!
//! Values are rounded to the nearest integer and written in half-byte
//! integer coding as unsigned 32-bit counts. There is no header and no fixed
//! point; ion counts are the intended input.

use super::half_bytes::{HalfByteReader, HalfByteWriter};
use crate::config::Numpress;
use crate::error::{CodecError, Result};

/// Encode non-negative values as rounded integers
pub fn encode(values: &[f64]) -> Result<Vec<u8>> {
    let mut writer = HalfByteWriter::with_capacity(values.len());
    for &value in values {
        let rounded = (value + 0.5).floor();
        if rounded > u32::MAX as f64 {
            return Err(CodecError::NumpressOverflow {
                numpress: Numpress::Pic,
                fixed_point: 1.0,
            });
        }
        // the half-byte coder works on the 32-bit pattern
        writer.push_int(rounded as u32 as i32);
    }
    Ok(writer.finish())
}

/// Decode a positive integer stream
pub fn decode(bytes: &[u8]) -> Result<Vec<f64>> {
    let mut reader = HalfByteReader::new(bytes);
    let mut values = Vec::with_capacity(bytes.len());
    while reader.has_more() {
        values.push(reader.read_int()? as u32 as f64);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_integers() {
        let bytes = encode(&[0.0, 4.4, 4.5, 1234.0]).unwrap();
        assert_eq!(decode(&bytes).unwrap(), vec![0.0, 4.0, 5.0, 1234.0]);
    }

    #[test]
    fn test_known_bytes() {
        // 5 -> [7, 5], 0 -> [8], padded
        assert_eq!(encode(&[5.0, 0.0]).unwrap(), vec![0x75, 0x80]);
    }

    #[test]
    fn test_empty() {
        assert!(encode(&[]).unwrap().is_empty());
        assert!(decode(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            encode(&[5e9]),
            Err(CodecError::NumpressOverflow { .. })
        ));
    }

    #[test]
    fn test_large_counts() {
        let values = vec![i32::MAX as f64, 1e9, 65536.0];
        assert_eq!(decode(&encode(&values).unwrap()).unwrap(), values);
    }

    #[test]
    fn test_counts_above_i32_range() {
        let values = vec![3.0e9, 10.0, u32::MAX as f64, i32::MAX as f64 + 1.0];
        assert_eq!(decode(&encode(&values).unwrap()).unwrap(), values);
    }
}
