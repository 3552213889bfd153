//! Unified error type for the public API
//!
//! The codec crates keep their domain-specific errors for precise handling.
//! This type wraps them so callers of the file-level API deal with one enum.
//!
//! # Example
//!
//! ```no_run
//! use smm2::Smm2Error;
//!
//! fn process_course() -> Result<(), Smm2Error> {
//!     // All asset operations return Smm2Error
//!     // Codec error types are converted automatically
//!     Ok(())
//! }
//! ```

use smm2_crypto::{IntegrityCheck, KeyError, LevelError, ThumbnailError};
use smm2_format::FormatError;
use thiserror::Error;

/// Unified error type for all asset operations
///
/// # Error Categories
///
/// - **Level**: course container size, integrity or cipher errors
/// - **Thumbnail**: thumbnail container size, marker, HMAC or image errors
/// - **Format**: malformed header or trailer fields
/// - **Key**: seed or IV parsing errors
/// - **Io**: file system errors
#[derive(Debug, Error)]
pub enum Smm2Error {
    /// Course container error
    #[error("Course error: {0}")]
    Level(#[from] LevelError),

    /// Thumbnail container error
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] ThumbnailError),

    /// Header or trailer format error
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Seed or IV error
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Buffer size matches no known container
    #[error("Unknown asset: {size} bytes matches neither a course nor a thumbnail container")]
    UnknownAsset { size: usize },
}

impl Smm2Error {
    /// Which integrity check failed, if this is an authentication failure
    pub fn integrity_check(&self) -> Option<IntegrityCheck> {
        match self {
            Self::Level(LevelError::Integrity(check)) => Some(*check),
            Self::Thumbnail(ThumbnailError::Integrity(check)) => Some(*check),
            _ => None,
        }
    }

    /// Returns true if the input failed CRC, CMAC or HMAC verification
    ///
    /// The input is untrusted or corrupted and must be rejected as a whole.
    pub fn is_integrity_error(&self) -> bool {
        self.integrity_check().is_some()
    }

    /// Returns true if the input length matched no expected size
    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::Level(LevelError::Size { .. })
                | Self::Thumbnail(ThumbnailError::Size { .. })
                | Self::Format(FormatError::InvalidLength { .. })
                | Self::UnknownAsset { .. }
        )
    }

    /// Returns a suggestion for resolving this error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::Level(LevelError::Integrity(IntegrityCheck::Crc)) => {
                Some("the course file is corrupted or was not produced by the game")
            }
            Self::Level(LevelError::Integrity(_)) => {
                Some("the course trailer does not match its contents; re-export the course")
            }
            Self::Thumbnail(ThumbnailError::TooLarge { .. }) => {
                Some("shrink the image dimensions before sealing it")
            }
            Self::Thumbnail(ThumbnailError::BadPadding { .. }) => {
                Some("the thumbnail trailer was modified after sealing; seal the JPEG again")
            }
            Self::Thumbnail(ThumbnailError::MissingMarker) => {
                Some("the file is a plain JPEG; seal it with encrypt-thumbnail first")
            }
            Self::UnknownAsset { .. } => {
                Some("course files are 376832 bytes and thumbnails 114688 bytes")
            }
            _ => None,
        }
    }
}
