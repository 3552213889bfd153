//! File-level operations on course and thumbnail containers
//!
//! These functions read a file, run the matching codec and write the result
//! atomically (a temporary file in the destination directory is persisted
//! over the target). Progress is reported through `tracing`.

use crate::error::Smm2Error;
use serde::Serialize;
use smm2_crypto::format::layout::{LEVEL_CONTAINER_SIZE, THUMBNAIL_CONTAINER_SIZE};
use smm2_crypto::{
    decrypt_level_with, decrypt_thumbnail, encrypt_level, seal_thumbnail, LevelDecryptOptions,
    LevelEncryptOptions, SealOutcome, ThumbnailOptions,
};
use smm2_format::{is_sealed_thumbnail, LevelHeader, LevelTrailer, ThumbnailTrailer};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// The two container types, told apart by their fixed sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Level,
    Thumbnail,
}

impl AssetKind {
    pub fn detect(bytes: &[u8]) -> Result<Self, Smm2Error> {
        match bytes.len() {
            LEVEL_CONTAINER_SIZE => Ok(AssetKind::Level),
            THUMBNAIL_CONTAINER_SIZE => Ok(AssetKind::Thumbnail),
            size => Err(Smm2Error::UnknownAsset { size }),
        }
    }

    pub fn container_size(self) -> usize {
        match self {
            AssetKind::Level => LEVEL_CONTAINER_SIZE,
            AssetKind::Thumbnail => THUMBNAIL_CONTAINER_SIZE,
        }
    }
}

/// Plaintext metadata of a container, read without verifying it
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetInfo {
    Level {
        header: LevelHeader,
        magic_valid: bool,
        trailer: LevelTrailer,
    },
    Thumbnail {
        sealed: bool,
        trailer: ThumbnailTrailer,
    },
}

/// Describe a container's header and trailer fields
pub fn inspect(bytes: &[u8]) -> Result<AssetInfo, Smm2Error> {
    match AssetKind::detect(bytes)? {
        AssetKind::Level => {
            let header = LevelHeader::parse(bytes)?;
            if !header.has_valid_magic() {
                warn!(magic = ?header.magic, "course header has an unexpected magic");
            }
            Ok(AssetInfo::Level {
                magic_valid: header.has_valid_magic(),
                header,
                trailer: LevelTrailer::parse(bytes)?,
            })
        }
        AssetKind::Thumbnail => Ok(AssetInfo::Thumbnail {
            sealed: is_sealed_thumbnail(bytes),
            trailer: ThumbnailTrailer::parse(bytes)?,
        }),
    }
}

/// Read a whole asset file
pub fn read_asset(path: &Path) -> Result<Vec<u8>, Smm2Error> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), size = bytes.len(), "read asset");
    Ok(bytes)
}

/// Write `bytes` to `path` through a temporary file in the same directory
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), Smm2Error> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), size = bytes.len(), "wrote asset");
    Ok(())
}

/// Decrypt a course file and return its payload
pub fn decrypt_level_file(
    path: &Path,
    options: &LevelDecryptOptions,
) -> Result<Vec<u8>, Smm2Error> {
    let container = read_asset(path)?;
    let payload = decrypt_level_with(&container, options)?;
    info!(path = %path.display(), size = payload.len(), "decrypted course");
    Ok(payload)
}

/// Encrypt a decrypted course payload from `src` into a container at `dst`
pub fn encrypt_level_file(
    src: &Path,
    dst: &Path,
    options: &LevelEncryptOptions,
) -> Result<(), Smm2Error> {
    let payload = read_asset(src)?;
    let container = encrypt_level(&payload, options)?;
    write_atomic(dst, &container)?;
    info!(src = %src.display(), dst = %dst.display(), seed = %options.seed, "encrypted course");
    Ok(())
}

/// Seal a JPEG from `src` into a thumbnail container at `dst`
pub fn encrypt_thumbnail_file(
    src: &Path,
    dst: &Path,
    options: &ThumbnailOptions,
) -> Result<SealOutcome, Smm2Error> {
    let jpeg = read_asset(src)?;
    let sealed = seal_thumbnail(&jpeg, options)?;
    match sealed.outcome {
        SealOutcome::AlreadySealed => {
            info!(src = %src.display(), "thumbnail already sealed, copying unchanged")
        }
        SealOutcome::Repacked {
            original_len,
            quality,
        } => warn!(
            src = %src.display(),
            original_len,
            quality,
            "thumbnail JPEG was too large and has been re-encoded"
        ),
        SealOutcome::Sealed => info!(src = %src.display(), "sealed thumbnail"),
    }
    write_atomic(dst, &sealed.container)?;
    Ok(sealed.outcome)
}

/// Verify a thumbnail file and return its JPEG payload
pub fn decrypt_thumbnail_file(path: &Path) -> Result<Vec<u8>, Smm2Error> {
    let container = read_asset(path)?;
    let jpeg = decrypt_thumbnail(&container)?;
    info!(path = %path.display(), size = jpeg.len(), "extracted thumbnail");
    Ok(jpeg)
}
