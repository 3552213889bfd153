//! Super Mario Maker 2 course and thumbnail protection
//!
//! Decrypts, verifies and re-encrypts the game's course (`.bcd`) containers
//! and seals thumbnail JPEGs so the game accepts them. The codecs live in
//! [`smm2_crypto`]; this crate adds file handling, zlib helpers and a single
//! error type.

pub mod asset;
pub mod compression;
pub mod error;
pub mod prelude;

pub use asset::{AssetInfo, AssetKind};
pub use error::Smm2Error;
pub use smm2_crypto::{
    decrypt_level, decrypt_level_with, decrypt_thumbnail, encrypt_level, encrypt_thumbnail,
    reencode_jpeg, seal_thumbnail, unpack_thumbnail, verify_thumbnail, IntegrityCheck, Iv,
    LevelDecryptOptions, LevelEncryptOptions, LevelError, SealOutcome, Seed, ThumbnailError,
    ThumbnailOptions,
};
pub use smm2_format::{LevelHeader, LevelTrailer, ThumbnailTrailer};
