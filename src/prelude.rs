//! Prelude
//!
//! Import everything needed for the common course and thumbnail workflows.
//!
//! # Example
//!
//! ```rust
//! use smm2::prelude::*;
//!
//! # fn example() -> Result<(), Smm2Error> {
//! let payload = vec![0u8; LEVEL_PAYLOAD_SIZE];
//! let container = encrypt_level(&payload, &LevelEncryptOptions::default())?;
//! assert_eq!(AssetKind::detect(&container)?, AssetKind::Level);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub use crate::asset::{
    decrypt_level_file, decrypt_thumbnail_file, encrypt_level_file, encrypt_thumbnail_file,
    inspect, AssetInfo, AssetKind,
};
pub use crate::error::Smm2Error;

pub use smm2_crypto::format::layout::{
    LEVEL_CONTAINER_SIZE, LEVEL_PAYLOAD_SIZE, THUMBNAIL_CONTAINER_SIZE, THUMBNAIL_PAYLOAD_LIMIT,
};
pub use smm2_crypto::{
    decrypt_level, decrypt_level_with, decrypt_thumbnail, encrypt_level, encrypt_thumbnail,
    unpack_thumbnail, verify_thumbnail, IntegrityCheck, Iv, LevelDecryptOptions,
    LevelEncryptOptions, Seed, ThumbnailOptions,
};
