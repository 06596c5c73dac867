use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mzbinary::codec::BinaryDataEncoder;

use super::{parse_values, read_input, EncodingArgs};

/// Encode numbers from a file or stdin and print the Base64 text
pub fn run(input: Option<PathBuf>, encoding: &EncodingArgs, json: bool) -> Result<()> {
    let config = encoding.encoder_config()?;
    let values = parse_values(&read_input(input.as_deref())?)?;

    let encoder = BinaryDataEncoder::new(config).context("Invalid encoder configuration")?;
    let encoded = encoder
        .encode(&values)
        .with_context(|| format!("Failed to encode {} values", values.len()))?;

    info!(
        "Encoded {} values: {} binary bytes ({} before compression)",
        values.len(),
        encoded.binary_byte_count,
        encoded.decompressed_byte_count
    );
    info!("Effective configuration: {}", encoded.config);

    if json {
        println!("{}", serde_json::to_string_pretty(&encoded)?);
    } else {
        println!("{}", encoded.text);
    }

    Ok(())
}
