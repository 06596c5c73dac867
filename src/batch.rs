//! Encoding and decoding many arrays at once
//!
//! A spectrum carries several arrays, each with its own resolved
//! configuration. With the `parallel` feature the arrays are spread over the
//! rayon thread pool; results keep the input order and the first error wins.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::debug;

use crate::codec::{self, EncodedArray};
use crate::config::EncoderConfig;
use crate::error::Result;

/// One array to encode and the configuration that applies to it
#[derive(Debug, Clone, Copy)]
pub struct ArrayJob<'a> {
    /// Values to encode
    pub values: &'a [f64],
    /// Resolved configuration for this array
    pub config: &'a EncoderConfig,
}

impl<'a> ArrayJob<'a> {
    /// Pair values with their configuration
    pub fn new(values: &'a [f64], config: &'a EncoderConfig) -> Self {
        Self { values, config }
    }
}

/// Encode every job, in order
pub fn encode_batch(jobs: &[ArrayJob<'_>]) -> Result<Vec<EncodedArray>> {
    debug!("Encoding batch of {} arrays", jobs.len());

    #[cfg(feature = "parallel")]
    let encoded = jobs
        .par_iter()
        .map(|job| codec::encode(job.values, job.config))
        .collect::<Result<Vec<_>>>();

    #[cfg(not(feature = "parallel"))]
    let encoded = jobs
        .iter()
        .map(|job| codec::encode(job.values, job.config))
        .collect::<Result<Vec<_>>>();

    encoded
}

/// Encode every array with one shared configuration
pub fn encode_all(arrays: &[Vec<f64>], config: &EncoderConfig) -> Result<Vec<EncodedArray>> {
    let jobs: Vec<ArrayJob<'_>> = arrays
        .iter()
        .map(|values| ArrayJob::new(values, config))
        .collect();
    encode_batch(&jobs)
}

/// Decode encoded arrays with the configuration each one reports
pub fn decode_batch(arrays: &[EncodedArray]) -> Result<Vec<Vec<f64>>> {
    debug!("Decoding batch of {} arrays", arrays.len());

    #[cfg(feature = "parallel")]
    let decoded = arrays
        .par_iter()
        .map(|array| codec::decode(&array.text, &array.config))
        .collect::<Result<Vec<_>>>();

    #[cfg(not(feature = "parallel"))]
    let decoded = arrays
        .iter()
        .map(|array| codec::decode(&array.text, &array.config))
        .collect::<Result<Vec<_>>>();

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Compression, Numpress, Precision};
    use crate::error::CodecError;

    #[test]
    fn test_mixed_configs_round_trip() {
        let mz: Vec<f64> = (0..50).map(|i| 200.0 + i as f64 * 0.5).collect();
        let intensity: Vec<f64> = (0..50).map(|i| (i * 37 % 1000) as f64).collect();

        let mz_config = EncoderConfig::default().with_compression(Compression::Zlib);
        let intensity_config = EncoderConfig::default().with_precision(Precision::Float32);

        let encoded = encode_batch(&[
            ArrayJob::new(&mz, &mz_config),
            ArrayJob::new(&intensity, &intensity_config),
        ])
        .unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[1].config.precision, Precision::Float32);

        let decoded = decode_batch(&encoded).unwrap();
        assert_eq!(decoded[0], mz);
        assert_eq!(decoded[1], intensity);
    }

    #[test]
    fn test_encode_all_keeps_order() {
        let arrays: Vec<Vec<f64>> = (0..20).map(|n| vec![n as f64; n]).collect();
        let encoded = encode_all(&arrays, &EncoderConfig::default()).unwrap();
        let decoded = decode_batch(&encoded).unwrap();
        assert_eq!(decoded, arrays);
    }

    #[test]
    fn test_error_propagates() {
        let good = vec![1.0, 2.0];
        let bad = vec![1.0, f64::NAN];
        let config = EncoderConfig::default().with_numpress(Numpress::Linear);
        let result = encode_batch(&[ArrayJob::new(&good, &config), ArrayJob::new(&bad, &config)]);
        assert!(matches!(result, Err(CodecError::InvalidValue { index: 1, .. })));
    }
}
