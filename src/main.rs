//! # mzbinary
//!
//! A command-line tool for encoding and decoding mass spectrometry binary
//! data arrays the way mzML and mzXML store them.
//!
//! ## Usage
//!
//! ```bash
//! # Encode m/z values with numpress linear and zlib
//! echo "445.12 445.62 446.12" | mzbinary encode -n linear -c zlib
//!
//! # Decode 32-bit little-endian zlib text
//! mzbinary decode -p 32 -c zlib peaks.b64
//!
//! # Compare encodings of an intensity array
//! mzbinary inspect -n slof --tolerance 0.001 intensities.txt
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
