//! Tests for the mzML and mzXML format layers
//!
//! This test suite validates:
//! - Per-array configuration resolution through CV params
//! - mzML binaryDataArray encoding terms in both directions
//! - mzXML `<peaks>` attributes, byte order and pairing
//! - Batch encoding of whole spectra

use mzbinary::mzml;
use mzbinary::mzxml;
use mzbinary::prelude::*;

// ============================================================================
// Helper Functions
// ============================================================================

fn spectrum() -> (Vec<f64>, Vec<f64>) {
    let mz: Vec<f64> = (0..250).map(|i| 150.0 + i as f64 * 3.125).collect();
    let intensity: Vec<f64> = (0..250).map(|i| ((i * 7919) % 100_000) as f64).collect();
    (mz, intensity)
}

/// Writer setup commonly used for mzML: numpress m/z, 32-bit intensities
fn writer_config() -> EncoderConfig {
    EncoderConfig::default()
        .with_compression(Compression::Zlib)
        .with_numpress_override(array_terms::MZ_ARRAY, Numpress::Linear)
        .with_precision_override(array_terms::INTENSITY_ARRAY, Precision::Float32)
}

// ============================================================================
// mzML
// ============================================================================

#[test]
fn test_mzml_spectrum_round_trip() {
    let vocab = ArrayVocabulary::psi_ms();
    let config = writer_config();
    let (mz, intensity) = spectrum();

    let mz_array = mzml::encode_array(&mz, array_terms::MZ_ARRAY, &config, &vocab).unwrap();
    let intensity_array =
        mzml::encode_array(&intensity, array_terms::INTENSITY_ARRAY, &config, &vocab).unwrap();

    let mz_terms: Vec<&str> = mz_array.cv_params.iter().map(|p| p.accession.as_str()).collect();
    assert_eq!(
        mz_terms,
        vec![
            array_terms::MZ_ARRAY,
            binary_terms::FLOAT_64_BIT,
            binary_terms::NUMPRESS_LINEAR_ZLIB,
        ]
    );

    let intensity_terms: Vec<&str> = intensity_array
        .cv_params
        .iter()
        .map(|p| p.accession.as_str())
        .collect();
    assert_eq!(
        intensity_terms,
        vec![
            array_terms::INTENSITY_ARRAY,
            binary_terms::FLOAT_32_BIT,
            binary_terms::ZLIB_COMPRESSION,
        ]
    );

    let decoded_mz = mzml::decode_array(&mz_array.encoded.text, &mz_terms, Some(mz.len())).unwrap();
    for (o, d) in mz.iter().zip(&decoded_mz) {
        assert!((1.0 - d / o).abs() <= 1e-4);
    }

    let decoded_intensity =
        mzml::decode_array(&intensity_array.encoded.text, &intensity_terms, Some(250)).unwrap();
    assert_eq!(decoded_intensity, intensity);
}

#[test]
fn test_mzml_decodes_hand_written_array() {
    // 100.0, 200.0 as little-endian f64, as it appears in an mzML document
    let text = "AAAAAAAAWUAAAAAAAABpQA==";
    let params = [
        binary_terms::FLOAT_64_BIT,
        binary_terms::NO_COMPRESSION,
        array_terms::MZ_ARRAY,
    ];
    assert_eq!(
        mzml::decode_array(text, &params, Some(2)).unwrap(),
        vec![100.0, 200.0]
    );
}

#[test]
fn test_mzml_conflicting_array_types() {
    let vocab = ArrayVocabulary::psi_ms();
    let config = writer_config();
    let result = config.resolve(&[array_terms::MZ_ARRAY, array_terms::TIME_ARRAY], &vocab);
    assert!(matches!(
        result,
        Err(CodecError::ConfigurationInconsistent(_))
    ));
}

#[test]
fn test_custom_vocabulary_inherits_overrides() {
    let vocab = ArrayVocabulary::psi_ms().with_term(
        "MS:1003007",
        "raw ion mobility array",
        array_terms::ION_MOBILITY_ARRAY,
    );
    let config = EncoderConfig::default()
        .with_precision_override(array_terms::ION_MOBILITY_ARRAY, Precision::Float32);

    let resolved = config.resolve(&["MS:1003007"], &vocab).unwrap();
    assert_eq!(resolved.precision, Precision::Float32);

    // Unknown to the default vocabulary: no override applies
    let resolved = config
        .resolve(&["MS:1003007"], &ArrayVocabulary::psi_ms())
        .unwrap();
    assert_eq!(resolved.precision, Precision::Float64);
}

// ============================================================================
// mzXML
// ============================================================================

#[test]
fn test_mzxml_peaks_round_trip() {
    let (mz, intensity) = spectrum();
    for precision in [Precision::Float32, Precision::Float64] {
        for compression in [Compression::None, Compression::Zlib] {
            let config = EncoderConfig::default()
                .with_precision(precision)
                .with_compression(compression);
            let xml = mzxml::write_peaks(&mz, &intensity, &config).unwrap();
            let peaks = mzxml::read_peaks(&xml).unwrap();

            assert_eq!(peaks.len(), mz.len());
            assert_eq!(peaks.attributes.precision, precision);
            assert_eq!(peaks.attributes.compression, compression);
            // every value here is exact in 32 bits
            assert_eq!(peaks.mz, mz);
            assert_eq!(peaks.intensity, intensity);
        }
    }
}

#[test]
fn test_mzxml_always_network_order() {
    // Little-endian writer config is overridden for mzXML
    let config = EncoderConfig::default().with_byte_order(ByteOrder::Little);
    let xml = mzxml::write_peaks(&[100.0], &[200.0], &config).unwrap();
    assert!(xml.contains("QFkAAAAAAABAaQAAAAAAAA=="));
}

#[test]
fn test_mzxml_compressed_len_matches_binary_bytes() {
    let (mz, intensity) = spectrum();
    let config = EncoderConfig::default().with_compression(Compression::Zlib);
    let xml = mzxml::write_peaks(&mz, &intensity, &config).unwrap();
    let peaks = mzxml::read_peaks(&xml).unwrap();

    let start = xml.find('>').unwrap() + 1;
    let end = xml.rfind("</peaks>").unwrap();
    let bytes = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &xml[start..end])
        .unwrap();
    assert_eq!(peaks.attributes.compressed_len, bytes.len());
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_resolved_spectrum() {
    let vocab = ArrayVocabulary::psi_ms();
    let config = writer_config();
    let (mz, intensity) = spectrum();

    let mz_config = config.resolve(&[array_terms::MZ_ARRAY], &vocab).unwrap();
    let intensity_config = config
        .resolve(&[array_terms::INTENSITY_ARRAY], &vocab)
        .unwrap();

    let encoded = encode_batch(&[
        ArrayJob::new(&mz, &mz_config),
        ArrayJob::new(&intensity, &intensity_config),
    ])
    .unwrap();
    assert_eq!(encoded[0].config.numpress, Numpress::Linear);
    assert_eq!(encoded[1].config.precision, Precision::Float32);

    let decoded = decode_batch(&encoded).unwrap();
    assert_eq!(decoded[1], intensity);
    assert_eq!(decoded[0].len(), mz.len());
}
