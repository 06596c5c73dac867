//! # mzbinary - Binary Data Arrays for Mass Spectrometry Formats
//!
//! `mzbinary` encodes arrays of m/z, intensity and other per-peak values into
//! the Base64 text that XML-based mass spectrometry formats (mzML, mzXML)
//! embed in their documents, and decodes them back.
//!
//! ## Key Features
//!
//! - **Precision and Byte Order**: 32- or 64-bit IEEE-754 packing in either
//!   byte order.
//!
//! - **zlib Compression**: Optional deflate stage; truncated or corrupt
//!   streams are rejected instead of returning partial arrays.
//!
//! - **MS-Numpress**: Linear prediction, positive integer and short logged
//!   float transforms, with a relative error tolerance enforced on encode.
//!
//! - **Effective Configuration**: Every encode reports the configuration the
//!   text must be decoded with, including derived numpress fixed points.
//!
//! - **HUPO-PSI CV Integration**: Per-array overrides keyed by CV accession,
//!   resolved against a caller-supplied array type hierarchy.
//!
//! ## Quick Start
//!
//! ```rust
//! use mzbinary::prelude::*;
//!
//! let config = EncoderConfig::default()
//!     .with_compression(Compression::Zlib)
//!     .with_numpress(Numpress::Linear);
//! let encoder = BinaryDataEncoder::new(config)?;
//!
//! let mz = vec![445.120_025, 445.620_31, 446.120_52, 447.118_75];
//! let encoded = encoder.encode(&mz)?;
//!
//! // Decode with the configuration the encoder reports
//! let decoded = mzbinary::codec::decode(&encoded.text, &encoded.config)?;
//! for (original, decoded) in mz.iter().zip(&decoded) {
//!     assert!((1.0 - decoded / original).abs() <= 1e-4);
//! }
//! # Ok::<(), mzbinary::error::CodecError>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`config`]: Encoder configuration, overrides and validation
//! - [`codec`]: Encode/decode pipeline (numpress, packing, zlib, Base64)
//! - [`controlled_vocabulary`]: HUPO-PSI MS terms for binary data arrays
//! - [`mzml`]: mzML `binaryDataArray` CV param mapping
//! - [`mzxml`]: mzXML `<peaks>` element writer and reader
//! - [`batch`]: Encoding and decoding many arrays at once
//! - [`error`]: Codec error kinds
//!
//! ## Pipeline
//!
//! | Stage | Encode | Decode |
//! |-------|--------|--------|
//! | Numeric transform | numpress, or pack at precision/byte order | numpress decode, or unpack |
//! | Compression | zlib (optional) | inflate (optional) |
//! | Text transport | Base64, no line breaks | Base64, whitespace ignored |
//!
//! Nothing about the configuration is stored in the text itself; the format
//! layer persists it (mzML CV params, mzXML attributes).

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod codec;
pub mod config;
pub mod controlled_vocabulary;
pub mod error;
pub mod mzml;
pub mod mzxml;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::batch::{decode_batch, encode_all, encode_batch, ArrayJob};
    pub use crate::codec::{BinaryDataEncoder, EncodedArray};
    pub use crate::config::{
        ByteOrder, Compression, EncoderConfig, Numpress, NumpressFallback, Precision,
        DEFAULT_NUMPRESS_ERROR_TOLERANCE,
    };
    pub use crate::controlled_vocabulary::{array_terms, binary_terms, ArrayVocabulary, CvTerm};
    pub use crate::error::{CodecError, Result};
    pub use crate::mzml::{EncodedBinaryArray, MzMLArrayError};
    pub use crate::mzxml::{MzXmlError, Peaks, PeaksAttributes};
}
