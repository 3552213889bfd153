//! Super Mario Maker 2 container layouts
//!
//! This crate describes the on-disk byte layout of the two protected asset
//! types without doing any cryptography:
//! - Course (level) containers: a 16-byte header, AES-CBC ciphertext and a
//!   trailer carrying the IV, derivation seed and CMAC tag
//! - Thumbnail containers: a zero-padded JPEG followed by a marker, an
//!   HMAC-SHA256 tag and the derivation seed
//!
//! All multi-byte integers are little-endian.

pub mod binary;
pub mod header;
pub mod layout;
pub mod trailer;

pub use binary::BinaryRead;
pub use header::LevelHeader;
pub use trailer::{is_sealed_thumbnail, LevelTrailer, ThumbnailTrailer};

use thiserror::Error;

/// Errors raised while reading container fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid buffer length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Copy a fixed-size array out of `bytes` at `offset`
///
/// Callers check the buffer length first; every offset used in this crate is
/// a layout constant.
pub(crate) fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut buf = [0u8; N];
    buf.copy_from_slice(&bytes[offset..offset + N]);
    buf
}
