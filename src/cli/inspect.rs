use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use mzbinary::codec::BinaryDataEncoder;
use mzbinary::config::EncoderConfig;

use super::{parse_values, read_input, EncodingArgs};

#[derive(Serialize)]
struct Report<'a> {
    value_count: usize,
    raw_byte_count: usize,
    decompressed_byte_count: usize,
    binary_byte_count: usize,
    text_length: usize,
    compression_ratio: f64,
    lossless: bool,
    config: &'a EncoderConfig,
}

/// Encode numbers and describe the result
pub fn run(input: Option<PathBuf>, encoding: &EncodingArgs, json: bool) -> Result<()> {
    let config = encoding.encoder_config()?;
    let values = parse_values(&read_input(input.as_deref())?)?;

    let encoder = BinaryDataEncoder::new(config).context("Invalid encoder configuration")?;
    let encoded = encoder
        .encode(&values)
        .with_context(|| format!("Failed to encode {} values", values.len()))?;

    let report = Report {
        value_count: values.len(),
        raw_byte_count: values.len() * 8,
        decompressed_byte_count: encoded.decompressed_byte_count,
        binary_byte_count: encoded.binary_byte_count,
        text_length: encoded.text.len(),
        compression_ratio: encoded.compression_ratio(values.len()),
        lossless: encoded.config.is_lossless(),
        config: &encoded.config,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("mzbinary Encoding Report");
    println!("========================");
    println!("Configuration: {}", report.config);
    println!();
    println!("Sizes:");
    println!("  Values: {}", report.value_count);
    println!("  Raw 64-bit bytes: {}", report.raw_byte_count);
    println!("  Packed bytes: {}", report.decompressed_byte_count);
    println!("  Binary bytes: {}", report.binary_byte_count);
    println!("  Base64 characters: {}", report.text_length);
    println!("  Text/raw ratio: {:.3}", report.compression_ratio);
    println!();
    println!("Lossless: {}", if report.lossless { "yes" } else { "no" });

    if encoded.config.numpress.is_active() {
        let decoded = mzbinary::codec::decode(&encoded.text, &encoded.config)
            .context("Failed to decode the encoded array")?;
        let worst = mzbinary::codec::numpress::max_relative_error(&values, &decoded);
        println!("Worst relative error: {worst:e}");
    }

    Ok(())
}
