//! Super Mario Maker 2 asset cryptography
//!
//! This crate reproduces the protection applied by the game to course and
//! thumbnail files, byte for byte:
//! - A seeded four-word xorshift generator ([`random::Generator`])
//! - Table-driven key derivation on top of it ([`derive::derive_key`])
//! - Course containers: AES-128-CBC, CRC32 and AES-CMAC over the plaintext
//! - Thumbnail containers: HMAC-SHA256 over the zero-padded JPEG
//!
//! # Security Features
//!
//! - **Zeroization**: derived key material is cleared on drop
//! - **Constant-time comparison**: CMAC and HMAC tags are compared with
//!   `subtle::ConstantTimeEq`
//! - **Injectable randomness**: defaults are deterministic for reproducible
//!   output; `random()` option constructors draw from the OS RNG
//!
//! # Example
//!
//! ```
//! use smm2_crypto::format::layout::LEVEL_PAYLOAD_SIZE;
//! use smm2_crypto::{decrypt_level, encrypt_level, LevelEncryptOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let payload = vec![0u8; LEVEL_PAYLOAD_SIZE];
//! let container = encrypt_level(&payload, &LevelEncryptOptions::random())?;
//! assert_eq!(decrypt_level(&container)?, payload);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod derive;
pub mod helpers;
pub mod hmac;
pub mod level;
pub mod random;
pub mod tables;
pub mod thumbnail;
pub mod types;

pub use smm2_format as format;

// Re-export commonly used types
pub use derive::{derive_key, DERIVED_KEY_SIZE};
pub use helpers::{generate_iv, generate_seed, CryptoError};
pub use hmac::HmacError;
pub use level::{
    decrypt_level, decrypt_level_with, encrypt_level, LevelDecryptOptions, LevelEncryptOptions,
    LevelError,
};
pub use random::Generator;
pub use tables::{LEVEL_TABLE, THUMBNAIL_TABLE};
pub use thumbnail::{
    decrypt_thumbnail, encrypt_thumbnail, reencode_jpeg, seal_thumbnail, unpack_thumbnail,
    verify_thumbnail, SealOutcome, SealedThumbnail, ThumbnailError, ThumbnailOptions,
};
pub use types::{DerivedKey, IntegrityCheck, Iv, KeyError, Seed};
