//! TOML configuration file support.
//!
//! Instead of passing many CLI flags, users can keep an encoder setup in a
//! config file, including per-array overrides:
//!
//! ```toml
//! # mzbinary.toml
//! [encoder]
//! precision = "32"
//! compression = "zlib"
//! numpress = "linear"
//! numpress_error_tolerance = 0.0001
//!
//! [encoder.precision_overrides]
//! "MS:1000514" = "64"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use mzbinary::config::EncoderConfig;

/// Root configuration structure for mzbinary.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Encoder settings; missing keys take the encoder defaults.
    #[serde(default)]
    pub encoder: EncoderConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML configuration")?;
        config
            .encoder
            .validate()
            .context("Invalid encoder configuration")?;
        Ok(config)
    }
}
