//! zlib helpers
//!
//! Course data exchanged with the game's online service is zlib-wrapped.
//! These helpers are independent of the container codecs.

use flate2::read::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use std::io::Read;

/// Compress data into a zlib stream at the default level
pub fn compress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::default());
    let mut output = Vec::new();
    encoder.read_to_end(&mut output)?;
    Ok(output)
}

/// Decompress a zlib stream
pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output)?;
    Ok(output)
}
