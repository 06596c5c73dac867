//! Encoder configuration
//!
//! An [`EncoderConfig`] fixes everything the codec needs to turn a sequence of
//! doubles into text and back: numeric precision, byte order, generic
//! compression and the numpress transform with its fixed point and error
//! budget. Format layers pick one configuration per array, usually through the
//! per-term override maps resolved against an
//! [`ArrayVocabulary`](crate::controlled_vocabulary::ArrayVocabulary).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controlled_vocabulary::{binary_terms, ArrayVocabulary};
use crate::error::{CodecError, Result};

/// Default numpress error tolerance: 1/100th of one percent
pub const DEFAULT_NUMPRESS_ERROR_TOLERANCE: f64 = 1e-4;

/// Floating point width used when packing values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Precision {
    /// 32-bit IEEE-754 float (CV: MS:1000521)
    #[serde(rename = "32")]
    Float32,
    /// 64-bit IEEE-754 double (CV: MS:1000523)
    #[default]
    #[serde(rename = "64")]
    Float64,
}

impl Precision {
    /// Determine precision from a CV accession
    pub fn from_cv_accession(accession: &str) -> Option<Self> {
        match accession {
            binary_terms::FLOAT_32_BIT => Some(Precision::Float32),
            binary_terms::FLOAT_64_BIT => Some(Precision::Float64),
            _ => None,
        }
    }

    /// CV accession describing this precision
    pub fn cv_accession(&self) -> &'static str {
        match self {
            Precision::Float32 => binary_terms::FLOAT_32_BIT,
            Precision::Float64 => binary_terms::FLOAT_64_BIT,
        }
    }

    /// Get the byte size per value
    pub fn byte_size(&self) -> usize {
        match self {
            Precision::Float32 => 4,
            Precision::Float64 => 8,
        }
    }

    /// Width in bits, as written in mzXML `precision` attributes
    pub fn bits(&self) -> u32 {
        match self {
            Precision::Float32 => 32,
            Precision::Float64 => 64,
        }
    }
}

/// Byte order of each packed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first (mzML)
    #[default]
    Little,
    /// Most significant byte first, "network" order (mzXML)
    Big,
}

/// Generic byte-stream compression applied after packing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Raw bytes (CV: MS:1000576)
    #[default]
    None,
    /// zlib deflate (CV: MS:1000574)
    Zlib,
}

/// Lossy numerical pre-compression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numpress {
    /// Values are packed at the configured precision
    #[default]
    None,
    /// MS-Numpress linear prediction (CV: MS:1002312)
    Linear,
    /// MS-Numpress positive integer compression (CV: MS:1002313)
    Pic,
    /// MS-Numpress short logged float compression (CV: MS:1002314)
    Slof,
}

impl Numpress {
    /// Determine the numpress variant from a CV accession.
    ///
    /// Returns the variant and whether the term also implies zlib.
    pub fn from_cv_accession(accession: &str) -> Option<(Self, Compression)> {
        match accession {
            binary_terms::NUMPRESS_LINEAR => Some((Numpress::Linear, Compression::None)),
            binary_terms::NUMPRESS_PIC => Some((Numpress::Pic, Compression::None)),
            binary_terms::NUMPRESS_SLOF => Some((Numpress::Slof, Compression::None)),
            binary_terms::NUMPRESS_LINEAR_ZLIB => Some((Numpress::Linear, Compression::Zlib)),
            binary_terms::NUMPRESS_PIC_ZLIB => Some((Numpress::Pic, Compression::Zlib)),
            binary_terms::NUMPRESS_SLOF_ZLIB => Some((Numpress::Slof, Compression::Zlib)),
            _ => None,
        }
    }

    /// Whether a transform is active
    pub fn is_active(&self) -> bool {
        !matches!(self, Numpress::None)
    }
}

impl fmt::Display for Numpress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Numpress::None => "none",
            Numpress::Linear => "linear",
            Numpress::Pic => "pic",
            Numpress::Slof => "slof",
        };
        f.write_str(name)
    }
}

/// What to do when a numpress transform cannot meet the error tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumpressFallback {
    /// Raise [`CodecError::NumpressToleranceUnattainable`]
    #[default]
    Fail,
    /// Encode without numpress and report it in the effective configuration.
    ///
    /// Also applies when values exceed the variant's range at a derived
    /// fixed point; an explicitly requested fixed point still fails.
    Lossless,
}

/// Configuration for encoding and decoding one binary data array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Packing precision (ignored while numpress is active)
    pub precision: Precision,

    /// Byte order of packed values
    pub byte_order: ByteOrder,

    /// Generic compression applied to the packed or numpressed bytes
    pub compression: Compression,

    /// Numerical pre-compression
    pub numpress: Numpress,

    /// Fixed point for linear and slof; 0 derives the most precise safe value
    pub numpress_fixed_point: f64,

    /// Guarantee `abs(1 - decoded/original) <= tolerance`; 0 disables the check
    pub numpress_error_tolerance: f64,

    /// Behaviour when the tolerance cannot be met
    pub numpress_fallback: NumpressFallback,

    /// Precision per binary data array CV term
    pub precision_overrides: BTreeMap<String, Precision>,

    /// Numpress variant per binary data array CV term
    pub numpress_overrides: BTreeMap<String, Numpress>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            precision: Precision::Float64,
            byte_order: ByteOrder::Little,
            compression: Compression::None,
            numpress: Numpress::None,
            numpress_fixed_point: 0.0,
            numpress_error_tolerance: DEFAULT_NUMPRESS_ERROR_TOLERANCE,
            numpress_fallback: NumpressFallback::Fail,
            precision_overrides: BTreeMap::new(),
            numpress_overrides: BTreeMap::new(),
        }
    }
}

impl EncoderConfig {
    /// Set the packing precision
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the byte order
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Set the generic compression
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set the numpress variant
    pub fn with_numpress(mut self, numpress: Numpress) -> Self {
        self.numpress = numpress;
        self
    }

    /// Set the numpress fixed point (0 derives it from the data)
    pub fn with_fixed_point(mut self, fixed_point: f64) -> Self {
        self.numpress_fixed_point = fixed_point;
        self
    }

    /// Set the numpress error tolerance (0 disables the check)
    pub fn with_error_tolerance(mut self, tolerance: f64) -> Self {
        self.numpress_error_tolerance = tolerance;
        self
    }

    /// Set the fallback policy for unattainable tolerances
    pub fn with_fallback(mut self, fallback: NumpressFallback) -> Self {
        self.numpress_fallback = fallback;
        self
    }

    /// Override the precision for arrays of the given CV term (and its children)
    pub fn with_precision_override(mut self, accession: &str, precision: Precision) -> Self {
        self.precision_overrides
            .insert(accession.to_string(), precision);
        self
    }

    /// Override the numpress variant for arrays of the given CV term (and its children)
    pub fn with_numpress_override(mut self, accession: &str, numpress: Numpress) -> Self {
        self.numpress_overrides.insert(accession.to_string(), numpress);
        self
    }

    /// True when decoding reproduces the input exactly
    pub fn is_lossless(&self) -> bool {
        !self.numpress.is_active() && self.precision == Precision::Float64
    }

    /// Check the numeric parameters
    pub fn validate(&self) -> Result<()> {
        let fp = self.numpress_fixed_point;
        if !fp.is_finite() || fp < 0.0 {
            return Err(CodecError::ConfigurationInconsistent(format!(
                "numpress fixed point must be a finite non-negative number, got {fp}"
            )));
        }
        let tolerance = self.numpress_error_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CodecError::ConfigurationInconsistent(format!(
                "numpress error tolerance must be a finite non-negative number, got {tolerance}"
            )));
        }
        Ok(())
    }

    /// Resolve the configuration that applies to one array.
    ///
    /// `array_params` are the CV accessions attached to the array; the one
    /// that is-a "binary data array" in `vocabulary` selects the overrides.
    /// An override on a parent term applies to its children unless a closer
    /// term has its own. The returned config has no overrides left.
    pub fn resolve(
        &self,
        array_params: &[&str],
        vocabulary: &ArrayVocabulary,
    ) -> Result<EncoderConfig> {
        self.validate()?;

        let mut effective = EncoderConfig {
            precision_overrides: BTreeMap::new(),
            numpress_overrides: BTreeMap::new(),
            ..self.clone()
        };

        let Some(array_term) = vocabulary.array_type(array_params)? else {
            return Ok(effective);
        };

        let lineage = vocabulary.lineage(array_term);
        let precision_override = lineage
            .iter()
            .find_map(|acc| self.precision_overrides.get(*acc).copied());
        let numpress_override = lineage
            .iter()
            .find_map(|acc| self.numpress_overrides.get(*acc).copied());

        if let Some(precision) = precision_override {
            effective.precision = precision;
        }
        if let Some(numpress) = numpress_override {
            effective.numpress = numpress;
        }

        if effective.numpress.is_active() && precision_override == Some(Precision::Float32) {
            return Err(CodecError::ConfigurationInconsistent(format!(
                "{array_term} has a 32-bit precision override but numpress {} is active",
                effective.numpress
            )));
        }

        Ok(effective)
    }
}

impl fmt::Display for EncoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.precision.bits())?;
        match self.byte_order {
            ByteOrder::Little => write!(f, " little-endian")?,
            ByteOrder::Big => write!(f, " big-endian")?,
        }
        if self.compression == Compression::Zlib {
            write!(f, " zlib")?;
        }
        if self.numpress.is_active() {
            write!(f, " numpress-{}", self.numpress)?;
            if self.numpress_fixed_point > 0.0 {
                write!(f, " fixedpoint={}", self.numpress_fixed_point)?;
            }
            if self.numpress_error_tolerance > 0.0 {
                write!(f, " errortol={:e}", self.numpress_error_tolerance)?;
            }
        }
        for (accession, precision) in &self.precision_overrides {
            write!(f, " {accession}:{}-bit", precision.bits())?;
        }
        for (accession, numpress) in &self.numpress_overrides {
            write!(f, " {accession}:numpress-{numpress}")?;
        }
        Ok(())
    }
}
