//! zlib inflate/deflate adapter.
//!
//! Both container formats treat compression as an external primitive: the
//! ANM payload and every archive entry are zlib streams. Only round-trip
//! correctness matters here, not level or windowing.

use flate2::Compression;
use flate2::read::{ZlibDecoder, ZlibEncoder};
use std::io::Read;
use thiserror::Error;

/// Maximum allowed inflated size (1 GB).
///
/// Limits decompression output so a corrupt or hostile container cannot
/// balloon memory. The largest real game payloads are a few tens of
/// megabytes.
pub const MAX_INFLATED_SIZE: usize = 1024 * 1024 * 1024;

/// Compression adapter error.
#[derive(Debug, Error)]
pub enum CompressionError {
    /// zlib decompression failed.
    #[error("inflate failed: {0}")]
    Inflate(#[source] std::io::Error),

    /// zlib compression failed.
    #[error("deflate failed: {0}")]
    Deflate(#[source] std::io::Error),

    /// Inflated output passed [`MAX_INFLATED_SIZE`].
    #[error("inflated size exceeds limit of {limit} bytes")]
    InflatedTooLarge {
        /// The enforced ceiling
        limit: usize,
    },
}

/// Result type for compression operations
pub type CompressionResult<T> = Result<T, CompressionError>;

/// Decompress a zlib stream.
pub fn inflate(data: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut inflated = Vec::new();

    // Read in chunks to enforce the size ceiling.
    let mut buffer = [0u8; 8192];
    loop {
        let count = decoder
            .read(&mut buffer)
            .map_err(CompressionError::Inflate)?;
        if count == 0 {
            break;
        }
        if inflated.len() + count > MAX_INFLATED_SIZE {
            return Err(CompressionError::InflatedTooLarge {
                limit: MAX_INFLATED_SIZE,
            });
        }
        inflated.extend_from_slice(&buffer[..count]);
    }

    Ok(inflated)
}

/// Compress a buffer as a zlib stream.
pub fn deflate(data: &[u8]) -> CompressionResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::best());
    let mut deflated = Vec::new();
    encoder
        .read_to_end(&mut deflated)
        .map_err(CompressionError::Deflate)?;
    Ok(deflated)
}
