//! # HUPO-PSI Mass Spectrometry Controlled Vocabulary
//!
//! CV terms that describe how a binary data array is encoded (precision,
//! compression, numpress) and what it holds (m/z, intensity, time...).
//!
//! Array types form an is-a hierarchy rooted at "binary data array"
//! (MS:1000513). Resolution of per-array overrides walks that hierarchy
//! through an [`ArrayVocabulary`] handed in by the caller, so the codec never
//! touches a process-wide term database.
//!
//! ## Reference
//! - OBO file: https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::{CodecError, Result};

/// A controlled vocabulary term with its accession and name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CvTerm {
    /// CV accession (e.g., "MS:1000514")
    pub accession: String,
    /// Human-readable name
    pub name: String,
}

impl CvTerm {
    /// Create a new CV term with accession and name
    pub fn new(accession: &str, name: &str) -> Self {
        Self {
            accession: accession.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for CvTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.accession, self.name)
    }
}

/// Accessions describing the encoding of a binary data array
pub mod binary_terms {
    /// 32-bit float
    pub const FLOAT_32_BIT: &str = "MS:1000521";

    /// 64-bit float
    pub const FLOAT_64_BIT: &str = "MS:1000523";

    /// zlib compression
    pub const ZLIB_COMPRESSION: &str = "MS:1000574";

    /// No compression
    pub const NO_COMPRESSION: &str = "MS:1000576";

    /// MS-Numpress linear prediction
    pub const NUMPRESS_LINEAR: &str = "MS:1002312";

    /// MS-Numpress positive integer compression
    pub const NUMPRESS_PIC: &str = "MS:1002313";

    /// MS-Numpress short logged float compression
    pub const NUMPRESS_SLOF: &str = "MS:1002314";

    /// MS-Numpress linear prediction followed by zlib
    pub const NUMPRESS_LINEAR_ZLIB: &str = "MS:1002746";

    /// MS-Numpress positive integer compression followed by zlib
    pub const NUMPRESS_PIC_ZLIB: &str = "MS:1002747";

    /// MS-Numpress short logged float compression followed by zlib
    pub const NUMPRESS_SLOF_ZLIB: &str = "MS:1002748";

    /// Name of an encoding term, if it is one
    pub fn name(accession: &str) -> Option<&'static str> {
        let name = match accession {
            FLOAT_32_BIT => "32-bit float",
            FLOAT_64_BIT => "64-bit float",
            ZLIB_COMPRESSION => "zlib compression",
            NO_COMPRESSION => "no compression",
            NUMPRESS_LINEAR => "MS-Numpress linear prediction compression",
            NUMPRESS_PIC => "MS-Numpress positive integer compression",
            NUMPRESS_SLOF => "MS-Numpress short logged float compression",
            NUMPRESS_LINEAR_ZLIB => {
                "MS-Numpress linear prediction compression followed by zlib compression"
            }
            NUMPRESS_PIC_ZLIB => {
                "MS-Numpress positive integer compression followed by zlib compression"
            }
            NUMPRESS_SLOF_ZLIB => {
                "MS-Numpress short logged float compression followed by zlib compression"
            }
            _ => return None,
        };
        Some(name)
    }
}

/// Accessions of binary data array types
pub mod array_terms {
    /// Root of the array type hierarchy
    pub const BINARY_DATA_ARRAY: &str = "MS:1000513";

    /// m/z array
    pub const MZ_ARRAY: &str = "MS:1000514";

    /// Intensity array
    pub const INTENSITY_ARRAY: &str = "MS:1000515";

    /// Charge array
    pub const CHARGE_ARRAY: &str = "MS:1000516";

    /// Signal to noise array
    pub const SIGNAL_TO_NOISE_ARRAY: &str = "MS:1000517";

    /// Time array (chromatograms)
    pub const TIME_ARRAY: &str = "MS:1000595";

    /// Wavelength array
    pub const WAVELENGTH_ARRAY: &str = "MS:1000617";

    /// Non-standard data array
    pub const NON_STANDARD_DATA_ARRAY: &str = "MS:1000786";

    /// Flow rate array
    pub const FLOW_RATE_ARRAY: &str = "MS:1000820";

    /// Pressure array
    pub const PRESSURE_ARRAY: &str = "MS:1000821";

    /// Temperature array
    pub const TEMPERATURE_ARRAY: &str = "MS:1000822";

    /// Ion mobility array
    pub const ION_MOBILITY_ARRAY: &str = "MS:1002893";

    /// Mean ion mobility array
    pub const MEAN_ION_MOBILITY_ARRAY: &str = "MS:1002816";

    /// Mean drift time array
    pub const MEAN_DRIFT_TIME_ARRAY: &str = "MS:1002477";

    /// Mean inverse reduced ion mobility array
    pub const MEAN_INVERSE_REDUCED_ION_MOBILITY_ARRAY: &str = "MS:1003006";
}

#[derive(Debug, Clone)]
struct VocabularyEntry {
    name: String,
    parent: Option<String>,
}

/// Read-only is-a lookup for binary data array terms.
///
/// Built once by the caller and shared by reference; it holds no interior
/// mutability, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct ArrayVocabulary {
    terms: HashMap<String, VocabularyEntry>,
}

impl Default for ArrayVocabulary {
    fn default() -> Self {
        Self::psi_ms()
    }
}

impl ArrayVocabulary {
    /// A vocabulary that only knows the root "binary data array" term
    pub fn new() -> Self {
        let mut terms = HashMap::new();
        terms.insert(
            array_terms::BINARY_DATA_ARRAY.to_string(),
            VocabularyEntry {
                name: "binary data array".to_string(),
                parent: None,
            },
        );
        Self { terms }
    }

    /// The array types of the PSI-MS vocabulary used by mzML writers
    pub fn psi_ms() -> Self {
        use array_terms::*;

        Self::new()
            .with_term(MZ_ARRAY, "m/z array", BINARY_DATA_ARRAY)
            .with_term(INTENSITY_ARRAY, "intensity array", BINARY_DATA_ARRAY)
            .with_term(CHARGE_ARRAY, "charge array", BINARY_DATA_ARRAY)
            .with_term(SIGNAL_TO_NOISE_ARRAY, "signal to noise array", BINARY_DATA_ARRAY)
            .with_term(TIME_ARRAY, "time array", BINARY_DATA_ARRAY)
            .with_term(WAVELENGTH_ARRAY, "wavelength array", BINARY_DATA_ARRAY)
            .with_term(NON_STANDARD_DATA_ARRAY, "non-standard data array", BINARY_DATA_ARRAY)
            .with_term(FLOW_RATE_ARRAY, "flow rate array", BINARY_DATA_ARRAY)
            .with_term(PRESSURE_ARRAY, "pressure array", BINARY_DATA_ARRAY)
            .with_term(TEMPERATURE_ARRAY, "temperature array", BINARY_DATA_ARRAY)
            .with_term(ION_MOBILITY_ARRAY, "ion mobility array", BINARY_DATA_ARRAY)
            .with_term(MEAN_ION_MOBILITY_ARRAY, "mean ion mobility array", ION_MOBILITY_ARRAY)
            .with_term(MEAN_DRIFT_TIME_ARRAY, "mean drift time array", MEAN_ION_MOBILITY_ARRAY)
            .with_term(
                MEAN_INVERSE_REDUCED_ION_MOBILITY_ARRAY,
                "mean inverse reduced ion mobility array",
                MEAN_ION_MOBILITY_ARRAY,
            )
    }

    /// Add a term under `parent`
    pub fn with_term(mut self, accession: &str, name: &str, parent: &str) -> Self {
        self.terms.insert(
            accession.to_string(),
            VocabularyEntry {
                name: name.to_string(),
                parent: Some(parent.to_string()),
            },
        );
        self
    }

    /// Number of known terms, the root included
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the vocabulary is empty (never true: the root is always present)
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Name of a known term
    pub fn name(&self, accession: &str) -> Option<&str> {
        self.terms.get(accession).map(|t| t.name.as_str())
    }

    /// The term and its ancestors, closest first
    pub fn lineage<'a>(&'a self, accession: &'a str) -> Vec<&'a str> {
        let mut lineage = vec![accession];
        let mut current = accession;
        while let Some(parent) = self.terms.get(current).and_then(|t| t.parent.as_deref()) {
            if lineage.contains(&parent) {
                break;
            }
            lineage.push(parent);
            current = parent;
        }
        lineage
    }

    /// Whether `accession` is-a binary data array (the root itself excluded)
    pub fn is_array_type(&self, accession: &str) -> bool {
        accession != array_terms::BINARY_DATA_ARRAY
            && self.terms.contains_key(accession)
            && self
                .lineage(accession)
                .contains(&array_terms::BINARY_DATA_ARRAY)
    }

    /// Pick the array type among an array's CV params.
    ///
    /// Two different array types on one array is a configuration error.
    pub fn array_type<'p>(&self, params: &[&'p str]) -> Result<Option<&'p str>> {
        let mut found: Option<&'p str> = None;
        for &accession in params {
            if !self.is_array_type(accession) {
                continue;
            }
            match found {
                Some(previous) if previous != accession => {
                    return Err(CodecError::ConfigurationInconsistent(format!(
                        "array is tagged with both {previous} and {accession}"
                    )));
                }
                _ => found = Some(accession),
            }
        }
        Ok(found)
    }
}
