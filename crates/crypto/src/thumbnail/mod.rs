//! Thumbnail container codec
//!
//! A thumbnail container is 0x1C000 bytes:
//!
//! ```text
//! [0x00000..0x1BF9C] JPEG payload, zero padded
//! [0x1BF9C..0x1BFA0] marker 9C BF 01 00
//! [0x1BFA0..0x1BFC0] HMAC-SHA256 over [0x00000..0x1BF9C]
//! [0x1BFC0..0x1BFD0] generator seed
//! [0x1BFD0..0x1C000] zero padding
//! ```
//!
//! The payload is not encrypted; only the HMAC key is derived.

pub mod repack;

pub use repack::{reencode_jpeg, repack_until_fit, Repacked, DEFAULT_QUALITIES, UNPACK_QUALITY};

use crate::derive::{derive_key, DERIVED_KEY_SIZE};
use crate::helpers::{generate_seed, CryptoError};
use crate::hmac::{calculate_hmac, verify_hmac, HmacError};
use crate::random::Generator;
use crate::tables::THUMBNAIL_TABLE;
use crate::types::{DerivedKey, IntegrityCheck, KeyError, Seed};
use serde::{Deserialize, Serialize};
use smm2_format::layout::*;
use smm2_format::{is_sealed_thumbnail, FormatError, ThumbnailTrailer};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Invalid thumbnail buffer size: expected {expected}, got {got}")]
    Size { expected: usize, got: usize },

    #[error("Thumbnail marker missing")]
    MissingMarker,

    #[error("Thumbnail trailer padding is not zero at offset {offset:#x}")]
    BadPadding { offset: usize },

    #[error("Thumbnail integrity check failed: {0} mismatch")]
    Integrity(IntegrityCheck),

    #[error("Thumbnail too large: {size} bytes after repacking (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CryptoError),

    #[error("HMAC error: {0}")]
    Hmac(HmacError),
}

impl From<HmacError> for ThumbnailError {
    fn from(e: HmacError) -> Self {
        match e {
            HmacError::VerificationFailed => ThumbnailError::Integrity(IntegrityCheck::Hmac),
            other => ThumbnailError::Hmac(other),
        }
    }
}

impl From<KeyError> for ThumbnailError {
    fn from(e: KeyError) -> Self {
        ThumbnailError::Cipher(CryptoError::Key(e))
    }
}

impl From<FormatError> for ThumbnailError {
    fn from(e: FormatError) -> Self {
        let FormatError::InvalidLength { expected, got } = e;
        ThumbnailError::Size { expected, got }
    }
}

/// Seed and repack settings used to seal a thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailOptions {
    #[serde(default)]
    pub seed: Seed,
    #[serde(default = "default_qualities")]
    pub qualities: Vec<u8>,
}

fn default_qualities() -> Vec<u8> {
    DEFAULT_QUALITIES.to_vec()
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            seed: Seed::default(),
            qualities: default_qualities(),
        }
    }
}

impl ThumbnailOptions {
    /// Default quality ladder with a seed from the operating system RNG
    pub fn random() -> Self {
        Self {
            seed: generate_seed(),
            ..Self::default()
        }
    }
}

/// What sealing did to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SealOutcome {
    /// Input was already a sealed container and is returned as is
    AlreadySealed,
    /// Payload fit and was sealed unchanged
    Sealed,
    /// Payload was re-encoded at `quality` to fit
    Repacked { original_len: usize, quality: u8 },
}

#[derive(Debug, Clone)]
pub struct SealedThumbnail {
    pub container: Vec<u8>,
    pub outcome: SealOutcome,
}

/// Seal a JPEG payload into a 0x1C000-byte thumbnail container
pub fn encrypt_thumbnail(
    payload: &[u8],
    options: &ThumbnailOptions,
) -> Result<Vec<u8>, ThumbnailError> {
    seal_thumbnail(payload, options).map(|sealed| sealed.container)
}

/// Seal a JPEG payload, reporting whether it was repacked
///
/// An input that is already a sealed container (exact size and marker) is
/// returned unchanged. Inputs longer than the payload limit are re-encoded
/// down `options.qualities` first.
pub fn seal_thumbnail(
    payload: &[u8],
    options: &ThumbnailOptions,
) -> Result<SealedThumbnail, ThumbnailError> {
    if is_sealed_thumbnail(payload) {
        return Ok(SealedThumbnail {
            container: payload.to_vec(),
            outcome: SealOutcome::AlreadySealed,
        });
    }

    let (payload, outcome) = if payload.len() > THUMBNAIL_PAYLOAD_LIMIT {
        let repacked = repack_until_fit(payload, &options.qualities)?;
        let outcome = SealOutcome::Repacked {
            original_len: payload.len(),
            quality: repacked.quality,
        };
        (Cow::Owned(repacked.bytes), outcome)
    } else {
        (Cow::Borrowed(payload), SealOutcome::Sealed)
    };

    let mut container = vec![0u8; THUMBNAIL_CONTAINER_SIZE];
    container[..payload.len()].copy_from_slice(&payload);

    let key = thumbnail_key(&options.seed)?;
    let tag = calculate_hmac(key.as_slice(), &container[..THUMBNAIL_PAYLOAD_LIMIT])?;

    container[THUMBNAIL_MARKER_OFFSET..THUMBNAIL_HMAC_OFFSET].copy_from_slice(&THUMBNAIL_MARKER);
    container[THUMBNAIL_HMAC_OFFSET..THUMBNAIL_SEED_OFFSET].copy_from_slice(&tag);
    container[THUMBNAIL_SEED_OFFSET..THUMBNAIL_PADDING_OFFSET]
        .copy_from_slice(options.seed.as_bytes());
    container[THUMBNAIL_PADDING_OFFSET..].fill(0);

    Ok(SealedThumbnail { container, outcome })
}

/// Check the marker, zero padding and HMAC of a sealed thumbnail container
pub fn verify_thumbnail(container: &[u8]) -> Result<(), ThumbnailError> {
    let trailer = ThumbnailTrailer::parse(container)?;
    if !trailer.has_marker() {
        return Err(ThumbnailError::MissingMarker);
    }
    if let Some(i) = container[THUMBNAIL_PADDING_OFFSET..]
        .iter()
        .position(|&b| b != 0)
    {
        return Err(ThumbnailError::BadPadding {
            offset: THUMBNAIL_PADDING_OFFSET + i,
        });
    }
    let key = thumbnail_key(&Seed::from_bytes(trailer.seed))?;
    verify_hmac(
        key.as_slice(),
        &container[..THUMBNAIL_PAYLOAD_LIMIT],
        &trailer.hmac,
    )?;
    Ok(())
}

/// Verify a sealed container and return its JPEG without the zero padding
pub fn decrypt_thumbnail(container: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    verify_thumbnail(container)?;
    let payload = &container[..THUMBNAIL_PAYLOAD_LIMIT];
    let end = payload.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    Ok(payload[..end].to_vec())
}

/// Re-encode the picture inside a container as a standalone JPEG
///
/// The trailer is not checked; this also works on containers whose HMAC was
/// produced with a different key.
pub fn unpack_thumbnail(container: &[u8]) -> Result<Vec<u8>, ThumbnailError> {
    if container.len() != THUMBNAIL_CONTAINER_SIZE {
        return Err(ThumbnailError::Size {
            expected: THUMBNAIL_CONTAINER_SIZE,
            got: container.len(),
        });
    }
    Ok(reencode_jpeg(container, UNPACK_QUALITY)?)
}

fn thumbnail_key(seed: &Seed) -> Result<DerivedKey, KeyError> {
    let mut generator = Generator::from_seed(seed);
    derive_key(&mut generator, &THUMBNAIL_TABLE, DERIVED_KEY_SIZE)
}
