use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mzbinary::codec::BinaryDataEncoder;

use super::{read_input, EncodingArgs};

/// Decode Base64 text from a file or stdin and print one value per line
pub fn run(
    input: Option<PathBuf>,
    encoding: &EncodingArgs,
    expected_length: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = encoding.encoder_config()?;
    let text = read_input(input.as_deref())?;

    let encoder = BinaryDataEncoder::new(config).context("Invalid encoder configuration")?;
    let values = match expected_length {
        Some(expected) => encoder.decode_with_length(&text, expected),
        None => encoder.decode(&text),
    }
    .with_context(|| format!("Failed to decode as {}", encoder.config()))?;

    info!("Decoded {} values", values.len());

    if json {
        println!("{}", serde_json::to_string(&values)?);
    } else {
        for value in &values {
            println!("{value}");
        }
    }

    Ok(())
}
