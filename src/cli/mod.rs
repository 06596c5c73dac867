use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use mzbinary::config::{
    ByteOrder, Compression, EncoderConfig, Numpress, NumpressFallback, Precision,
};

mod config;
mod decode;
mod encode;
mod inspect;

pub use config::Config;

/// mzbinary - Binary data array codec for mzML and mzXML
#[derive(Parser)]
#[command(name = "mzbinary")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Numeric precision for packed values.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PrecisionArg {
    /// 32-bit float
    #[value(name = "32")]
    Float32,
    /// 64-bit float
    #[value(name = "64")]
    Float64,
}

impl From<PrecisionArg> for Precision {
    fn from(arg: PrecisionArg) -> Self {
        match arg {
            PrecisionArg::Float32 => Precision::Float32,
            PrecisionArg::Float64 => Precision::Float64,
        }
    }
}

/// Byte order of packed values.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ByteOrderArg {
    /// Little endian (mzML)
    Little,
    /// Big endian (mzXML)
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}

/// Generic compression.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    /// No compression
    None,
    /// zlib
    Zlib,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => Compression::None,
            CompressionArg::Zlib => Compression::Zlib,
        }
    }
}

/// MS-Numpress transform.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum NumpressArg {
    /// No numpress
    None,
    /// Linear prediction (m/z, retention time)
    Linear,
    /// Positive integer compression (ion counts)
    Pic,
    /// Short logged float (intensities)
    Slof,
}

impl From<NumpressArg> for Numpress {
    fn from(arg: NumpressArg) -> Self {
        match arg {
            NumpressArg::None => Numpress::None,
            NumpressArg::Linear => Numpress::Linear,
            NumpressArg::Pic => Numpress::Pic,
            NumpressArg::Slof => Numpress::Slof,
        }
    }
}

/// Encoding options shared by every subcommand.
///
/// Flags override values loaded from `--config`.
#[derive(Args, Debug)]
pub struct EncodingArgs {
    /// Load encoder settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Precision (32 or 64)
    #[arg(short = 'p', long, value_enum)]
    precision: Option<PrecisionArg>,

    /// Byte order
    #[arg(long, value_enum)]
    byte_order: Option<ByteOrderArg>,

    /// Generic compression
    #[arg(short = 'c', long, value_enum)]
    compression: Option<CompressionArg>,

    /// MS-Numpress transform
    #[arg(short = 'n', long, value_enum)]
    numpress: Option<NumpressArg>,

    /// Numpress fixed point (0 derives it from the data)
    #[arg(long)]
    fixed_point: Option<f64>,

    /// Numpress relative error tolerance (0 disables the check)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Encode losslessly when numpress cannot meet the tolerance
    #[arg(long)]
    lossless_fallback: bool,
}

impl EncodingArgs {
    /// Build the encoder configuration from the config file and flags.
    pub fn encoder_config(&self) -> Result<EncoderConfig> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?.encoder,
            None => EncoderConfig::default(),
        };

        if let Some(precision) = self.precision {
            config.precision = precision.into();
        }
        if let Some(byte_order) = self.byte_order {
            config.byte_order = byte_order.into();
        }
        if let Some(compression) = self.compression {
            config.compression = compression.into();
        }
        if let Some(numpress) = self.numpress {
            config.numpress = numpress.into();
        }
        if let Some(fixed_point) = self.fixed_point {
            config.numpress_fixed_point = fixed_point;
        }
        if let Some(tolerance) = self.tolerance {
            config.numpress_error_tolerance = tolerance;
        }
        if self.lossless_fallback {
            config.numpress_fallback = NumpressFallback::Lossless;
        }

        config.validate().context("Invalid encoder configuration")?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encode numbers (whitespace or comma separated) to Base64
    Encode {
        /// Input file with numbers, stdin when omitted or "-"
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Print the encoded array and its effective configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode Base64 text to numbers
    Decode {
        /// Input file with Base64 text, stdin when omitted or "-"
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Fail unless exactly this many values are decoded
        #[arg(long, value_name = "COUNT")]
        expected_length: Option<usize>,

        /// Print the values as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Encode numbers and report sizes and the effective configuration
    Inspect {
        /// Input file with numbers, stdin when omitted or "-"
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        #[command(flatten)]
        encoding: EncodingArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encode {
            input,
            encoding,
            json,
        } => encode::run(input, &encoding, json),
        Commands::Decode {
            input,
            encoding,
            expected_length,
            json,
        } => decode::run(input, &encoding, expected_length, json),
        Commands::Inspect {
            input,
            encoding,
            json,
        } => inspect::run(input, &encoding, json),
    }
}

/// Read a file, or stdin for `None` and "-"
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read stdin")?;
            Ok(content)
        }
    }
}

/// Parse numbers separated by whitespace or commas
fn parse_values(content: &str) -> Result<Vec<f64>> {
    content
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .with_context(|| format!("Invalid number #{}: {:?}", i + 1, token))
        })
        .collect()
}
