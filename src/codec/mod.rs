//! Binary data encoding pipeline
//!
//! Encoding runs three stages, each independently invertible:
//!
//! 1. Numpress transform, or fixed-width packing at the configured precision
//!    and byte order
//! 2. Generic compression (zlib)
//! 3. Base64 text transport
//!
//! Decoding runs them in reverse. Nothing about the configuration travels in
//! the encoded text; callers persist it next to the text (mzML CV params,
//! mzXML attributes) and hand it back on decode.
//!
//! # Example
//!
//! ```rust
//! use mzbinary::codec::BinaryDataEncoder;
//! use mzbinary::config::{Compression, EncoderConfig};
//!
//! let config = EncoderConfig::default().with_compression(Compression::Zlib);
//! let encoder = BinaryDataEncoder::new(config)?;
//!
//! let encoded = encoder.encode(&[100.0, 200.0, 300.0])?;
//! assert_eq!(encoder.decode(&encoded.text)?, vec![100.0, 200.0, 300.0]);
//! # Ok::<(), mzbinary::error::CodecError>(())
//! ```

pub mod compression;
pub mod numpress;
pub mod packing;
#[cfg(feature = "simd")]
pub mod simd;
pub mod text;

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Serialize;

use crate::config::{EncoderConfig, Numpress, NumpressFallback, Precision};
use crate::error::{CodecError, Result};

/// Result of encoding one array
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedArray {
    /// Base64 text
    pub text: String,

    /// Bytes handed to Base64 (after compression)
    pub binary_byte_count: usize,

    /// Bytes produced by packing or numpress (before compression)
    pub decompressed_byte_count: usize,

    /// Configuration the text must be decoded with, including a derived
    /// numpress fixed point or a lossless fallback
    pub config: EncoderConfig,
}

impl EncodedArray {
    /// Size of the text relative to the raw 64-bit input
    pub fn compression_ratio(&self, value_count: usize) -> f64 {
        if self.text.is_empty() {
            return 1.0;
        }
        self.text.len() as f64 / (value_count * Precision::Float64.byte_size()) as f64
    }
}

/// Encoder and decoder for binary data arrays
///
/// Holds one read-only configuration. Every call is independent, so a single
/// encoder can be shared between threads.
#[derive(Debug, Clone)]
pub struct BinaryDataEncoder {
    config: EncoderConfig,
}

impl BinaryDataEncoder {
    /// Create an encoder after validating the configuration
    pub fn new(config: EncoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this encoder was built with
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode values to Base64 text
    pub fn encode(&self, values: &[f64]) -> Result<EncodedArray> {
        let mut config = EncoderConfig {
            precision_overrides: BTreeMap::new(),
            numpress_overrides: BTreeMap::new(),
            ..self.config.clone()
        };

        if values.is_empty() {
            return Ok(EncodedArray {
                text: String::new(),
                binary_byte_count: 0,
                decompressed_byte_count: 0,
                config,
            });
        }

        let bytes = if config.numpress.is_active() {
            self.numpress_bytes(values, &mut config)?
        } else {
            packing::pack(values, config.precision, config.byte_order)
        };

        let decompressed_byte_count = bytes.len();
        let compressed = compression::compress(bytes, config.compression)?;
        let binary_byte_count = compressed.len();
        let text = text::to_text(&compressed);

        debug!(
            "Encoded {} values as {} ({} bytes packed, {} bytes binary, {} chars)",
            values.len(),
            config,
            decompressed_byte_count,
            binary_byte_count,
            text.len()
        );

        Ok(EncodedArray {
            text,
            binary_byte_count,
            decompressed_byte_count,
            config,
        })
    }

    fn numpress_bytes(&self, values: &[f64], config: &mut EncoderConfig) -> Result<Vec<u8>> {
        let result = numpress::encode(
            values,
            config.numpress,
            config.numpress_fixed_point,
            config.numpress_error_tolerance,
        );

        // a caller-chosen fixed point that overflows is a configuration error
        let derived =
            !numpress::has_fixed_point(config.numpress) || config.numpress_fixed_point <= 0.0;

        match result {
            Ok(encoded) => {
                config.numpress_fixed_point = encoded.fixed_point;
                Ok(encoded.bytes)
            }
            Err(e) if config.numpress_fallback == NumpressFallback::Lossless => match e {
                CodecError::NumpressToleranceUnattainable {
                    numpress,
                    tolerance,
                    max_error,
                } => {
                    warn!(
                        "Numpress {} cannot meet error tolerance {:e} (worst {:e}); encoding losslessly",
                        numpress, tolerance, max_error
                    );
                    Ok(Self::lossless_fallback(values, config))
                }
                CodecError::NumpressOverflow { numpress, .. } if derived => {
                    warn!(
                        "Values exceed the numpress {} range; encoding losslessly",
                        numpress
                    );
                    Ok(Self::lossless_fallback(values, config))
                }
                e => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    fn lossless_fallback(values: &[f64], config: &mut EncoderConfig) -> Vec<u8> {
        config.numpress = Numpress::None;
        config.numpress_fixed_point = 0.0;
        config.precision = Precision::Float64;
        packing::pack(values, config.precision, config.byte_order)
    }

    /// Decode Base64 text produced with this encoder's configuration
    pub fn decode(&self, text: &str) -> Result<Vec<f64>> {
        let bytes = text::from_text(text)?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let config = &self.config;
        let bytes = compression::decompress(bytes, config.compression)?;
        let values = if config.numpress.is_active() {
            numpress::decode(config.numpress, &bytes)?
        } else {
            packing::unpack(&bytes, config.precision, config.byte_order)?
        };

        debug!("Decoded {} values as {}", values.len(), config);
        Ok(values)
    }

    /// Decode and check the number of values (e.g. mzML `defaultArrayLength`)
    pub fn decode_with_length(&self, text: &str, expected_length: usize) -> Result<Vec<f64>> {
        let values = self.decode(text)?;
        if values.len() != expected_length {
            return Err(CodecError::InvalidLength {
                expected: expected_length,
                actual: values.len(),
            });
        }
        Ok(values)
    }
}

/// Encode values with the given configuration
pub fn encode(values: &[f64], config: &EncoderConfig) -> Result<EncodedArray> {
    BinaryDataEncoder::new(config.clone())?.encode(values)
}

/// Decode text with the configuration it was encoded with
pub fn decode(text: &str, config: &EncoderConfig) -> Result<Vec<f64>> {
    BinaryDataEncoder::new(config.clone())?.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ByteOrder, Compression};

    #[test]
    fn test_encode_float64_little_endian() {
        let encoded = encode(&[100.0], &EncoderConfig::default()).unwrap();
        assert_eq!(encoded.text, "AAAAAAAAWUA=");
        assert_eq!(encoded.binary_byte_count, 8);
        assert_eq!(encoded.decompressed_byte_count, 8);
    }

    #[test]
    fn test_decode_float32_big_endian() {
        let config = EncoderConfig::default()
            .with_precision(Precision::Float32)
            .with_byte_order(ByteOrder::Big);
        // 100.0, 200.0 as big-endian f32
        let values = decode("QsgAAENIAAA=", &config).unwrap();
        assert_eq!(values, vec![100.0, 200.0]);
    }

    #[test]
    fn test_zlib_byte_counts() {
        let values: Vec<f64> = (0..1000).map(|i| (i % 10) as f64).collect();
        let config = EncoderConfig::default().with_compression(Compression::Zlib);
        let encoded = encode(&values, &config).unwrap();
        assert_eq!(encoded.decompressed_byte_count, 8000);
        assert!(encoded.binary_byte_count < 8000);
        assert_eq!(decode(&encoded.text, &config).unwrap(), values);
    }

    #[test]
    fn test_empty_input() {
        let config = EncoderConfig::default()
            .with_compression(Compression::Zlib)
            .with_numpress(Numpress::Linear);
        let encoded = encode(&[], &config).unwrap();
        assert!(encoded.text.is_empty());
        assert_eq!(encoded.binary_byte_count, 0);
        assert!(decode("", &config).unwrap().is_empty());
    }

    #[test]
    fn test_numpress_reports_fixed_point() {
        let values = [100.0, 100.5, 101.0, 101.5];
        let config = EncoderConfig::default().with_numpress(Numpress::Linear);
        let encoded = encode(&values, &config).unwrap();
        assert!(encoded.config.numpress_fixed_point > 0.0);
        assert_eq!(encoded.config.numpress, Numpress::Linear);

        let decoded = decode(&encoded.text, &encoded.config).unwrap();
        assert_eq!(decoded.len(), values.len());
    }

    #[test]
    fn test_lossless_fallback() {
        let values = [0.3, 1.7, 2.2];
        let config = EncoderConfig::default()
            .with_numpress(Numpress::Pic)
            .with_fallback(NumpressFallback::Lossless);
        let encoded = encode(&values, &config).unwrap();
        assert_eq!(encoded.config.numpress, Numpress::None);
        assert_eq!(encoded.config.precision, Precision::Float64);
        assert_eq!(decode(&encoded.text, &encoded.config).unwrap(), values);
    }

    #[test]
    fn test_fallback_fail_is_default() {
        let config = EncoderConfig::default().with_numpress(Numpress::Pic);
        assert!(matches!(
            encode(&[0.3], &config),
            Err(CodecError::NumpressToleranceUnattainable { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EncoderConfig::default().with_error_tolerance(f64::INFINITY);
        assert!(matches!(
            BinaryDataEncoder::new(config),
            Err(CodecError::ConfigurationInconsistent(_))
        ));
    }

    #[test]
    fn test_decode_with_length() {
        let encoder = BinaryDataEncoder::new(EncoderConfig::default()).unwrap();
        let encoded = encoder.encode(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(encoder.decode_with_length(&encoded.text, 3).unwrap().len(), 3);
        assert!(matches!(
            encoder.decode_with_length(&encoded.text, 4),
            Err(CodecError::InvalidLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_overrides_are_not_reported() {
        let config = EncoderConfig::default()
            .with_precision_override("MS:1000515", Precision::Float32);
        let encoded = encode(&[1.0], &config).unwrap();
        assert!(encoded.config.precision_overrides.is_empty());
    }
}
