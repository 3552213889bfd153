//! Course container codec
//!
//! A course container is 0x5C000 bytes:
//!
//! ```text
//! [0x00..0x10]       header: version, CRC32 of the payload, magic "SCDL"
//! [0x10..0x5BFD0]    AES-128-CBC ciphertext of the 0x5BFC0-byte payload
//! [0x5BFD0..0x5BFE0] IV
//! [0x5BFE0..0x5BFF0] generator seed
//! [0x5BFF0..0x5C000] AES-CMAC of the *plaintext* payload
//! ```
//!
//! Both keys come from one generator seeded from the trailer: the AES key is
//! derived first and the CMAC key continues the same stream.

use crate::derive::{derive_key, DERIVED_KEY_SIZE};
use crate::helpers::{
    aes_cbc_decrypt, aes_cbc_encrypt, aes_cmac, generate_iv, generate_seed, tags_match,
    CryptoError,
};
use crate::random::Generator;
use crate::tables::LEVEL_TABLE;
use crate::types::{DerivedKey, IntegrityCheck, Iv, KeyError, Seed};
use serde::{Deserialize, Serialize};
use smm2_format::layout::*;
use smm2_format::{FormatError, LevelHeader, LevelTrailer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Invalid course buffer size: expected {expected}, got {got}")]
    Size { expected: usize, got: usize },

    #[error("Course integrity check failed: {0} mismatch")]
    Integrity(IntegrityCheck),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CryptoError),
}

impl From<FormatError> for LevelError {
    fn from(e: FormatError) -> Self {
        let FormatError::InvalidLength { expected, got } = e;
        LevelError::Size { expected, got }
    }
}

impl From<KeyError> for LevelError {
    fn from(e: KeyError) -> Self {
        LevelError::Cipher(CryptoError::Key(e))
    }
}

/// Seed and IV used to encrypt a course
///
/// `Default` reproduces the fixed values used for deterministic output; use
/// [`LevelEncryptOptions::random`] for files that leave the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelEncryptOptions {
    #[serde(default)]
    pub seed: Seed,
    #[serde(default)]
    pub iv: Iv,
}

impl LevelEncryptOptions {
    /// Fresh seed and IV from the operating system RNG
    pub fn random() -> Self {
        Self {
            seed: generate_seed(),
            iv: generate_iv(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDecryptOptions {
    /// Prepend the 16-byte container header to the decrypted payload
    #[serde(default)]
    pub include_header: bool,
}

/// Keys for one course container, derived in file order
struct LevelKeys {
    aes: DerivedKey,
    cmac: DerivedKey,
}

impl LevelKeys {
    fn derive(seed: &Seed) -> Result<Self, KeyError> {
        let mut generator = Generator::from_seed(seed);
        let aes = derive_key(&mut generator, &LEVEL_TABLE, DERIVED_KEY_SIZE)?;
        let cmac = derive_key(&mut generator, &LEVEL_TABLE, DERIVED_KEY_SIZE)?;
        Ok(Self { aes, cmac })
    }
}

/// Decrypt and verify a course container, returning the 0x5BFC0-byte payload
pub fn decrypt_level(container: &[u8]) -> Result<Vec<u8>, LevelError> {
    decrypt_level_with(container, &LevelDecryptOptions::default())
}

/// Decrypt and verify a course container
///
/// The CRC32 is checked before the CMAC key is derived; either mismatch
/// rejects the whole container.
pub fn decrypt_level_with(
    container: &[u8],
    options: &LevelDecryptOptions,
) -> Result<Vec<u8>, LevelError> {
    if container.len() != LEVEL_CONTAINER_SIZE {
        return Err(LevelError::Size {
            expected: LEVEL_CONTAINER_SIZE,
            got: container.len(),
        });
    }
    let header = LevelHeader::parse(container)?;
    let trailer = LevelTrailer::parse(container)?;

    let mut generator = Generator::from_seed(&Seed::from_bytes(trailer.seed));
    let aes_key = derive_key(&mut generator, &LEVEL_TABLE, DERIVED_KEY_SIZE)?;

    let mut payload = container[LEVEL_PAYLOAD_OFFSET..LEVEL_IV_OFFSET].to_vec();
    aes_cbc_decrypt(&aes_key, &Iv::from_bytes(trailer.iv), &mut payload)?;

    if crc32fast::hash(&payload) != header.crc32 {
        return Err(LevelError::Integrity(IntegrityCheck::Crc));
    }

    let cmac_key = derive_key(&mut generator, &LEVEL_TABLE, DERIVED_KEY_SIZE)?;
    let tag = aes_cmac(&cmac_key, &payload)?;
    if !tags_match(&tag, &trailer.cmac) {
        return Err(LevelError::Integrity(IntegrityCheck::Cmac));
    }

    if options.include_header {
        let mut out = Vec::with_capacity(LEVEL_HEADER_AND_PAYLOAD_SIZE);
        out.extend_from_slice(&container[..LEVEL_HEADER_SIZE]);
        out.extend_from_slice(&payload);
        return Ok(out);
    }
    Ok(payload)
}

/// Encrypt a course payload into a 0x5C000-byte container
///
/// `input` is either the bare 0x5BFC0-byte payload, in which case a default
/// header is synthesised, or header plus payload (0x5BFD0 bytes), in which
/// case the given header is kept and only its CRC32 is refreshed.
pub fn encrypt_level(input: &[u8], options: &LevelEncryptOptions) -> Result<Vec<u8>, LevelError> {
    let (header, payload) = match input.len() {
        LEVEL_PAYLOAD_SIZE => (LevelHeader::new(crc32fast::hash(input)), input),
        LEVEL_HEADER_AND_PAYLOAD_SIZE => {
            let payload = &input[LEVEL_HEADER_SIZE..];
            let mut header = LevelHeader::parse(input)?;
            header.crc32 = crc32fast::hash(payload);
            (header, payload)
        }
        got => {
            return Err(LevelError::Size {
                expected: LEVEL_PAYLOAD_SIZE,
                got,
            })
        }
    };

    let keys = LevelKeys::derive(&options.seed)?;

    let mut ciphertext = payload.to_vec();
    aes_cbc_encrypt(&keys.aes, &options.iv, &mut ciphertext)?;
    let cmac = aes_cmac(&keys.cmac, payload)?;

    let trailer = LevelTrailer {
        iv: *options.iv.as_bytes(),
        seed: *options.seed.as_bytes(),
        cmac,
    };

    let mut container = Vec::with_capacity(LEVEL_CONTAINER_SIZE);
    container.extend_from_slice(&header.to_bytes());
    container.extend_from_slice(&ciphertext);
    container.extend_from_slice(&trailer.to_bytes());
    Ok(container)
}
