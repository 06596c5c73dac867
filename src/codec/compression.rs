//! Generic zlib compression of packed bytes
//!
//! Every call owns its own deflate state, so concurrent encoders never share
//! a stream object.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::{Decompress, FlushDecompress, Status};

use crate::config::Compression;
use crate::error::{CodecError, Result};

/// Compress bytes with the given scheme. `None` passes the buffer through.
pub fn compress(bytes: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(bytes),
        Compression::Zlib => {
            let mut encoder = ZlibEncoder::new(
                Vec::with_capacity(bytes.len() / 2 + 16),
                flate2::Compression::default(),
            );
            encoder
                .write_all(&bytes)
                .map_err(|e| CodecError::CompressionFailed(e.to_string()))?;
            encoder
                .finish()
                .map_err(|e| CodecError::CompressionFailed(e.to_string()))
        }
    }
}

/// Inverse of [`compress`].
///
/// A zlib stream that is corrupt, ends before its end-of-stream marker or is
/// followed by extra bytes is a [`CodecError::DecompressionFailed`]; nothing
/// partial is returned.
pub fn decompress(bytes: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
    match compression {
        Compression::None => Ok(bytes),
        Compression::Zlib => inflate(&bytes),
    }
}

fn inflate(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decompress = Decompress::new(true);
    let mut out = Vec::with_capacity(bytes.len().saturating_mul(4).max(64));

    loop {
        if out.len() == out.capacity() {
            out.reserve(out.capacity());
        }

        let consumed_before = decompress.total_in();
        let produced_before = decompress.total_out();
        let input = &bytes[consumed_before as usize..];

        let status = decompress
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| CodecError::DecompressionFailed(e.to_string()))?;

        if status == Status::StreamEnd {
            let consumed = decompress.total_in() as usize;
            if consumed < bytes.len() {
                return Err(CodecError::DecompressionFailed(format!(
                    "{} bytes after the end of the zlib stream",
                    bytes.len() - consumed
                )));
            }
            return Ok(out);
        }

        if decompress.total_in() == consumed_before && decompress.total_out() == produced_before
        {
            return Err(CodecError::DecompressionFailed(format!(
                "zlib stream truncated after {} of {} bytes",
                consumed_before,
                bytes.len()
            )));
        }
    }
}
