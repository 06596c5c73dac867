//! mzXML `<peaks>` element
//!
//! mzXML stores a scan's m/z and intensity values interleaved in a single
//! array, always in network (big-endian) byte order, and describes the
//! encoding in attributes:
//!
//! ```xml
//! <peaks compressionType="zlib" compressedLen="37" precision="32"
//!        byteOrder="network" pairOrder="m/z-int">eJxz...</peaks>
//! ```
//!
//! Numpress has no mzXML representation and is rejected on write.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::codec::BinaryDataEncoder;
use crate::config::{ByteOrder, Compression, EncoderConfig, Precision};
use crate::error::CodecError;

const PEAKS: &str = "peaks";
const PAIR_ORDER: &str = "m/z-int";

/// Errors that can occur while writing or reading `<peaks>`
#[derive(Debug, thiserror::Error)]
pub enum MzXmlError {
    /// Malformed XML
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// Writer I/O failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Encoding or decoding the element text failed
    #[error("Binary codec error: {0}")]
    CodecError(#[from] CodecError),

    /// Attribute or output is not UTF-8
    #[error("UTF-8 encoding error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    /// Required attribute absent
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// Attribute value outside what mzXML allows
    #[error("Invalid attribute value: {0}")]
    InvalidAttributeValue(String),

    /// m/z and intensity arrays cannot be paired
    #[error("Size mismatch: {0}")]
    SizeMismatch(String),

    /// The document holds no `<peaks>` element
    #[error("No <peaks> element found")]
    MissingPeaks,
}

/// Result type for mzXML peaks
pub type Result<T> = std::result::Result<T, MzXmlError>;

/// Encoding described by the attributes of a `<peaks>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeaksAttributes {
    /// `precision`
    pub precision: Precision,
    /// `compressionType`
    pub compression: Compression,
    /// `compressedLen` (0 when uncompressed)
    pub compressed_len: usize,
}

impl PeaksAttributes {
    /// Decode configuration for the element text
    pub fn config(&self) -> EncoderConfig {
        EncoderConfig::default()
            .with_precision(self.precision)
            .with_byte_order(ByteOrder::Big)
            .with_compression(self.compression)
    }
}

/// Decoded content of a `<peaks>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Peaks {
    /// m/z values
    pub mz: Vec<f64>,
    /// Intensities, index-aligned with `mz`
    pub intensity: Vec<f64>,
    /// Attributes the element was read with
    pub attributes: PeaksAttributes,
}

impl Peaks {
    /// Number of m/z-intensity pairs
    pub fn len(&self) -> usize {
        self.mz.len()
    }

    /// Whether the scan has no peaks
    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }
}

/// Write a `<peaks>` element for paired m/z and intensity arrays.
///
/// Precision and compression come from `config`; the byte order is always
/// network order.
pub fn write_peaks(mz: &[f64], intensity: &[f64], config: &EncoderConfig) -> Result<String> {
    if mz.len() != intensity.len() {
        return Err(MzXmlError::SizeMismatch(format!(
            "{} m/z values but {} intensities",
            mz.len(),
            intensity.len()
        )));
    }
    if config.numpress.is_active() {
        return Err(CodecError::ConfigurationInconsistent(format!(
            "numpress {} cannot be written to mzXML",
            config.numpress
        ))
        .into());
    }

    let interleaved: Vec<f64> = mz
        .iter()
        .zip(intensity)
        .flat_map(|(&m, &i)| [m, i])
        .collect();

    let config = config.clone().with_byte_order(ByteOrder::Big);
    let encoded = BinaryDataEncoder::new(config)?.encode(&interleaved)?;

    let mut peaks = BytesStart::new(PEAKS);
    match encoded.config.compression {
        Compression::Zlib => {
            peaks.push_attribute(("compressionType", "zlib"));
            peaks.push_attribute((
                "compressedLen",
                encoded.binary_byte_count.to_string().as_str(),
            ));
        }
        Compression::None => peaks.push_attribute(("compressedLen", "0")),
    }
    peaks.push_attribute(("precision", encoded.config.precision.bits().to_string().as_str()));
    peaks.push_attribute(("byteOrder", "network"));
    peaks.push_attribute(("pairOrder", PAIR_ORDER));

    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Start(peaks))?;
    writer.write_event(Event::Text(BytesText::new(&encoded.text)))?;
    writer.write_event(Event::End(BytesEnd::new(PEAKS)))?;

    let xml = String::from_utf8(writer.into_inner()).map_err(|e| e.utf8_error())?;
    Ok(xml)
}

/// Helper function to get an attribute value from a BytesStart
fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| MzXmlError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = std::str::from_utf8(&attr.value)?.to_string();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn parse_attributes(e: &BytesStart) -> Result<PeaksAttributes> {
    let precision = match get_attribute(e, "precision")?.as_deref() {
        Some("32") => Precision::Float32,
        Some("64") => Precision::Float64,
        Some(other) => {
            return Err(MzXmlError::InvalidAttributeValue(format!(
                "precision=\"{other}\""
            )))
        }
        None => return Err(MzXmlError::MissingAttribute("precision".to_string())),
    };

    match get_attribute(e, "byteOrder")?.as_deref() {
        None | Some("network") => {}
        Some(other) => {
            return Err(MzXmlError::InvalidAttributeValue(format!(
                "byteOrder=\"{other}\""
            )))
        }
    }

    // mzXML 3 renamed pairOrder to contentType
    for name in ["pairOrder", "contentType"] {
        if let Some(order) = get_attribute(e, name)? {
            if order != PAIR_ORDER {
                return Err(MzXmlError::InvalidAttributeValue(format!(
                    "{name}=\"{order}\""
                )));
            }
        }
    }

    let compression = match get_attribute(e, "compressionType")?.as_deref() {
        None | Some("none") => Compression::None,
        Some("zlib") => Compression::Zlib,
        Some(other) => {
            return Err(MzXmlError::InvalidAttributeValue(format!(
                "compressionType=\"{other}\""
            )))
        }
    };

    let compressed_len = match get_attribute(e, "compressedLen")? {
        Some(len) => len
            .trim()
            .parse::<usize>()
            .map_err(|_| MzXmlError::InvalidAttributeValue(format!("compressedLen=\"{len}\"")))?,
        None => 0,
    };

    Ok(PeaksAttributes {
        precision,
        compression,
        compressed_len,
    })
}

/// Read the first `<peaks>` element in `xml` and split it into m/z and
/// intensity arrays.
pub fn read_peaks(xml: &str) -> Result<Peaks> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut attributes = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == PEAKS.as_bytes() => {
                attributes = Some(parse_attributes(&e)?);
            }
            Event::Empty(e) if e.name().as_ref() == PEAKS.as_bytes() => {
                attributes = Some(parse_attributes(&e)?);
                break;
            }
            Event::Text(t) if attributes.is_some() => {
                text.push_str(&t.unescape()?);
            }
            Event::End(e) if e.name().as_ref() == PEAKS.as_bytes() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    let attributes = attributes.ok_or(MzXmlError::MissingPeaks)?;
    let values = BinaryDataEncoder::new(attributes.config())?.decode(&text)?;

    if values.len() % 2 != 0 {
        return Err(MzXmlError::SizeMismatch(format!(
            "{} values do not form m/z-intensity pairs",
            values.len()
        )));
    }

    let (mz, intensity) = values.chunks_exact(2).map(|pair| (pair[0], pair[1])).unzip();

    Ok(Peaks {
        mz,
        intensity,
        attributes,
    })
}
