//! Trailers carried at the end of each container

use crate::layout::*;
use crate::{read_array, FormatError};
use serde::{Deserialize, Serialize};

/// Fields stored after the course ciphertext
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTrailer {
    pub iv: [u8; BLOCK_SIZE],
    pub seed: [u8; SEED_SIZE],
    pub cmac: [u8; BLOCK_SIZE],
}

impl LevelTrailer {
    /// Read the trailer of a complete course container
    pub fn parse(container: &[u8]) -> Result<Self, FormatError> {
        if container.len() != LEVEL_CONTAINER_SIZE {
            return Err(FormatError::InvalidLength {
                expected: LEVEL_CONTAINER_SIZE,
                got: container.len(),
            });
        }
        Ok(Self {
            iv: read_array(container, LEVEL_IV_OFFSET),
            seed: read_array(container, LEVEL_SEED_OFFSET),
            cmac: read_array(container, LEVEL_CMAC_OFFSET),
        })
    }

    /// Serialize in on-disk order (IV, seed, CMAC)
    pub fn to_bytes(&self) -> [u8; LEVEL_CONTAINER_SIZE - LEVEL_IV_OFFSET] {
        let mut out = [0u8; LEVEL_CONTAINER_SIZE - LEVEL_IV_OFFSET];
        out[..BLOCK_SIZE].copy_from_slice(&self.iv);
        out[BLOCK_SIZE..BLOCK_SIZE + SEED_SIZE].copy_from_slice(&self.seed);
        out[BLOCK_SIZE + SEED_SIZE..].copy_from_slice(&self.cmac);
        out
    }
}

/// Fields stored after the thumbnail JPEG payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailTrailer {
    pub marker: [u8; 4],
    pub hmac: [u8; THUMBNAIL_HMAC_SIZE],
    pub seed: [u8; SEED_SIZE],
}

impl ThumbnailTrailer {
    /// Read the trailer of a complete thumbnail container
    pub fn parse(container: &[u8]) -> Result<Self, FormatError> {
        if container.len() != THUMBNAIL_CONTAINER_SIZE {
            return Err(FormatError::InvalidLength {
                expected: THUMBNAIL_CONTAINER_SIZE,
                got: container.len(),
            });
        }
        Ok(Self {
            marker: read_array(container, THUMBNAIL_MARKER_OFFSET),
            hmac: read_array(container, THUMBNAIL_HMAC_OFFSET),
            seed: read_array(container, THUMBNAIL_SEED_OFFSET),
        })
    }

    pub fn has_marker(&self) -> bool {
        self.marker == THUMBNAIL_MARKER
    }
}

/// True if `container` has the exact thumbnail size and carries the marker
pub fn is_sealed_thumbnail(container: &[u8]) -> bool {
    container.len() == THUMBNAIL_CONTAINER_SIZE
        && container[THUMBNAIL_MARKER_OFFSET..THUMBNAIL_MARKER_OFFSET + 4] == THUMBNAIL_MARKER
}
