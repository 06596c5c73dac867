//! Error taxonomy for the binary data codec.

use crate::config::Numpress;

/// Errors raised while encoding or decoding a binary data array.
///
/// Every stage reports its own kind and the facade passes it through
/// unchanged. No operation returns partial output alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// NaN or infinity where the active transform cannot represent it,
    /// or a negative value handed to a non-negative numpress variant.
    #[error("Invalid value at index {index}: {value}")]
    InvalidValue {
        /// Position of the offending value in the input
        index: usize,
        /// The offending value
        value: f64,
    },

    /// No representable fixed point satisfies the requested error tolerance
    #[error(
        "Numpress {numpress} cannot meet error tolerance {tolerance:e} (worst relative error {max_error:e})"
    )]
    NumpressToleranceUnattainable {
        /// Variant that was asked to encode
        numpress: Numpress,
        /// Requested relative error bound
        tolerance: f64,
        /// Worst relative error reached at the most precise fixed point tried
        max_error: f64,
    },

    /// A scaled value does not fit in the variant's integer range
    #[error("Numpress {numpress} overflow at fixed point {fixed_point}")]
    NumpressOverflow {
        /// Variant that overflowed
        numpress: Numpress,
        /// Fixed point that produced the overflow
        fixed_point: f64,
    },

    /// Truncated or malformed numpress byte stream
    #[error("Corrupt numpress data: {0}")]
    CorruptNumpress(String),

    /// The zlib encoder reported an error
    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    /// Corrupt or truncated zlib stream
    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    /// Malformed Base64 text
    #[error("Invalid Base64 encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    /// Malformed Base64 text reported by the SIMD decoder
    #[error("Invalid Base64 encoding: {0}")]
    InvalidEncodingText(String),

    /// Byte or value count does not match what the layout requires
    #[error("Invalid data length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected count
        expected: usize,
        /// Actual count
        actual: usize,
    },

    /// Contradictory configuration request
    #[error("Inconsistent configuration: {0}")]
    ConfigurationInconsistent(String),
}

impl CodecError {
    /// True for the kinds that signal malformed encoded input
    /// rather than a bad configuration or unencodable values.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            CodecError::CorruptNumpress(_)
                | CodecError::DecompressionFailed(_)
                | CodecError::InvalidEncoding(_)
                | CodecError::InvalidEncodingText(_)
                | CodecError::InvalidLength { .. }
        )
    }
}

/// Result alias used throughout the codec
pub type Result<T> = std::result::Result<T, CodecError>;
