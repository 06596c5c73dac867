//! mzML `<binaryDataArray>` encoding terms
//!
//! mzML records how each array was encoded as CV params next to the
//! `<binary>` element, and always stores little-endian values:
//!
//! ```xml
//! <binaryDataArray encodedLength="24">
//!   <cvParam cvRef="MS" accession="MS:1000523" name="64-bit float"/>
//!   <cvParam cvRef="MS" accession="MS:1000574" name="zlib compression"/>
//!   <cvParam cvRef="MS" accession="MS:1000514" name="m/z array"/>
//!   <binary>eJxjYEAFAAAYAAE=</binary>
//! </binaryDataArray>
//! ```
//!
//! This module maps those params to an [`EncoderConfig`] for decoding, and
//! an effective configuration back to the params a writer must emit.

use crate::codec::{BinaryDataEncoder, EncodedArray};
use crate::config::{ByteOrder, Compression, EncoderConfig, Numpress, Precision};
use crate::controlled_vocabulary::{binary_terms, ArrayVocabulary, CvTerm};
use crate::error::CodecError;

/// Errors raised while mapping mzML array params
#[derive(Debug, thiserror::Error)]
pub enum MzMLArrayError {
    /// Two params of the same kind disagree
    #[error("Conflicting {kind} CV params: {first} and {second}")]
    ConflictingParams {
        /// What the params describe ("precision", "compression", "numpress")
        kind: &'static str,
        /// First accession seen
        first: String,
        /// Disagreeing accession
        second: String,
    },

    /// Codec failure while encoding or decoding the array
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for mzML array mapping
pub type Result<T> = std::result::Result<T, MzMLArrayError>;

/// An encoded array ready to be written into a `<binaryDataArray>`
#[derive(Debug, Clone)]
pub struct EncodedBinaryArray {
    /// Text for `<binary>` with byte counts and the effective configuration
    pub encoded: EncodedArray,
    /// CV params to write, array type first
    pub cv_params: Vec<CvTerm>,
}

impl EncodedBinaryArray {
    /// Value of the `encodedLength` attribute
    pub fn encoded_length(&self) -> usize {
        self.encoded.text.len()
    }
}

fn keep_first<T: PartialEq + Copy>(
    slot: &mut Option<(T, String)>,
    value: T,
    accession: &str,
    kind: &'static str,
) -> Result<()> {
    match slot {
        Some((existing, first)) if *existing != value => Err(MzMLArrayError::ConflictingParams {
            kind,
            first: first.clone(),
            second: accession.to_string(),
        }),
        Some(_) => Ok(()),
        None => {
            *slot = Some((value, accession.to_string()));
            Ok(())
        }
    }
}

/// Build the decode configuration for an array from its CV accessions.
///
/// Unknown accessions (array types, units) are ignored. Missing precision
/// defaults to 64-bit, missing compression to none.
pub fn config_from_cv_params(accessions: &[&str]) -> Result<EncoderConfig> {
    let mut precision: Option<(Precision, String)> = None;
    let mut compression: Option<(Compression, String)> = None;
    let mut numpress: Option<(Numpress, String)> = None;

    for &accession in accessions {
        if let Some(p) = Precision::from_cv_accession(accession) {
            keep_first(&mut precision, p, accession, "precision")?;
        } else if let Some((n, c)) = Numpress::from_cv_accession(accession) {
            keep_first(&mut numpress, n, accession, "numpress")?;
            if c == Compression::Zlib {
                keep_first(&mut compression, c, accession, "compression")?;
            }
        } else if accession == binary_terms::ZLIB_COMPRESSION {
            keep_first(&mut compression, Compression::Zlib, accession, "compression")?;
        } else if accession == binary_terms::NO_COMPRESSION {
            keep_first(&mut compression, Compression::None, accession, "compression")?;
        }
    }

    Ok(EncoderConfig::default()
        .with_byte_order(ByteOrder::Little)
        .with_precision(precision.map(|(p, _)| p).unwrap_or_default())
        .with_compression(compression.map(|(c, _)| c).unwrap_or_default())
        .with_numpress(numpress.map(|(n, _)| n).unwrap_or_default()))
}

fn encoding_term(accession: &str) -> CvTerm {
    CvTerm::new(accession, binary_terms::name(accession).unwrap_or(accession))
}

/// CV params describing how an array was encoded.
///
/// Numpress arrays are tagged "64-bit float" and use the combined
/// numpress-plus-zlib term when zlib follows.
pub fn cv_params_for(config: &EncoderConfig) -> Vec<CvTerm> {
    let precision = if config.numpress.is_active() {
        Precision::Float64
    } else {
        config.precision
    };

    let compression = match (config.numpress, config.compression) {
        (Numpress::None, Compression::None) => binary_terms::NO_COMPRESSION,
        (Numpress::None, Compression::Zlib) => binary_terms::ZLIB_COMPRESSION,
        (Numpress::Linear, Compression::None) => binary_terms::NUMPRESS_LINEAR,
        (Numpress::Linear, Compression::Zlib) => binary_terms::NUMPRESS_LINEAR_ZLIB,
        (Numpress::Pic, Compression::None) => binary_terms::NUMPRESS_PIC,
        (Numpress::Pic, Compression::Zlib) => binary_terms::NUMPRESS_PIC_ZLIB,
        (Numpress::Slof, Compression::None) => binary_terms::NUMPRESS_SLOF,
        (Numpress::Slof, Compression::Zlib) => binary_terms::NUMPRESS_SLOF_ZLIB,
    };

    vec![
        encoding_term(precision.cv_accession()),
        encoding_term(compression),
    ]
}

/// Encode one array for mzML.
///
/// The writer configuration is resolved against `array_type` (overrides)
/// and forced to little endian.
pub fn encode_array(
    values: &[f64],
    array_type: &str,
    config: &EncoderConfig,
    vocabulary: &ArrayVocabulary,
) -> Result<EncodedBinaryArray> {
    let resolved = config
        .resolve(&[array_type], vocabulary)?
        .with_byte_order(ByteOrder::Little);
    let encoded = BinaryDataEncoder::new(resolved)?.encode(values)?;

    let mut cv_params = Vec::with_capacity(3);
    if let Some(name) = vocabulary.name(array_type) {
        cv_params.push(CvTerm::new(array_type, name));
    }
    cv_params.extend(cv_params_for(&encoded.config));

    Ok(EncodedBinaryArray { encoded, cv_params })
}

/// Decode the `<binary>` text of an array from its CV accessions.
///
/// `expected_length` is the spectrum's `defaultArrayLength`, when known.
pub fn decode_array(
    text: &str,
    accessions: &[&str],
    expected_length: Option<usize>,
) -> Result<Vec<f64>> {
    let encoder = BinaryDataEncoder::new(config_from_cv_params(accessions)?)?;
    let values = match expected_length {
        Some(expected) => encoder.decode_with_length(text, expected)?,
        None => encoder.decode(text)?,
    };
    Ok(values)
}
