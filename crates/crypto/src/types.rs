//! Seeds, IVs and zeroizing key material
//!
//! Derived keys clear their memory on drop. Seeds and IVs are public values
//! stored in the container trailers, so they are plain `Copy` types that
//! serialize as hex strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Seed and IV used when the caller does not supply their own
pub const DEFAULT_BLOCK: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];

/// 128-bit generator seed (four little-endian u32 words)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Seed(pub(crate) [u8; 16]);

impl Seed {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Seed(bytes)
    }

    /// Create a seed from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        block_from_slice(bytes).map(Seed)
    }

    /// Create a seed from generator state words
    pub fn from_words(words: [u32; 4]) -> Self {
        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Seed(bytes)
    }

    /// Generator state words, read little-endian
    pub fn words(&self) -> [u32; 4] {
        let mut words = [0u32; 4];
        for (word, chunk) in words.iter_mut().zip(self.0.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        words
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed(DEFAULT_BLOCK)
    }
}

impl FromStr for Seed {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        block_from_hex(s).map(Seed)
    }
}

impl TryFrom<String> for Seed {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Seed> for String {
    fn from(seed: Seed) -> Self {
        hex::encode(seed.0)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// 128-bit AES-CBC initialization vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iv(pub(crate) [u8; 16]);

impl Iv {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Iv(bytes)
    }

    /// Create an IV from a 16-byte slice
    pub fn from_slice(bytes: &[u8]) -> Result<Self, KeyError> {
        block_from_slice(bytes).map(Iv)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl Default for Iv {
    fn default() -> Self {
        Iv(DEFAULT_BLOCK)
    }
}

impl FromStr for Iv {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        block_from_hex(s).map(Iv)
    }
}

impl TryFrom<String> for Iv {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Iv> for String {
    fn from(iv: Iv) -> Self {
        hex::encode(iv.0)
    }
}

impl fmt::Display for Iv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Key bytes produced by the table-driven derivation, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey(pub(crate) Vec<u8>);

impl DerivedKey {
    /// Get a reference to the key bytes
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Which authentication check rejected a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityCheck {
    Crc,
    Cmac,
    Hmac,
}

impl fmt::Display for IntegrityCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IntegrityCheck::Crc => "CRC32",
            IntegrityCheck::Cmac => "CMAC",
            IntegrityCheck::Hmac => "HMAC",
        })
    }
}

/// Key-related errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Derived key length must be a positive multiple of 4, got {0}")]
    InvalidDerivationLength(usize),

    #[error("Derivation table is empty")]
    EmptyTable,
}

fn block_from_slice(bytes: &[u8]) -> Result<[u8; 16], KeyError> {
    if bytes.len() != 16 {
        return Err(KeyError::InvalidLength {
            expected: 16,
            got: bytes.len(),
        });
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(bytes);
    Ok(block)
}

fn block_from_hex(s: &str) -> Result<[u8; 16], KeyError> {
    let bytes = hex::decode(s.trim())?;
    block_from_slice(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_words_are_little_endian() {
        let seed = Seed::default();
        assert_eq!(
            seed.words(),
            [0x0403_0201, 0x0807_0605, 0x0c0b_0a09, 0x100f_0e0d]
        );
        assert_eq!(Seed::from_words(seed.words()), seed);
    }

    #[test]
    fn test_seed_hex_roundtrip() {
        let seed: Seed = "0102030405060708090a0b0c0d0e0f10".parse().unwrap();
        assert_eq!(seed, Seed::default());
        assert_eq!(seed.to_string(), "0102030405060708090a0b0c0d0e0f10");
    }

    #[test]
    fn test_seed_rejects_bad_input() {
        assert!(matches!(
            "0102".parse::<Seed>(),
            Err(KeyError::InvalidLength { expected: 16, got: 2 })
        ));
        assert!(matches!("zz".parse::<Seed>(), Err(KeyError::InvalidHex(_))));
        assert!(Iv::from_slice(&[0u8; 15]).is_err());
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Iv::default()).unwrap();
        assert_eq!(json, "\"0102030405060708090a0b0c0d0e0f10\"");
        let iv: Iv = serde_json::from_str(&json).unwrap();
        assert_eq!(iv, Iv::default());
        assert!(serde_json::from_str::<Seed>("\"00\"").is_err());
    }
}
