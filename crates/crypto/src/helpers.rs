//! Cryptographic helper functions
//!
//! Thin wrappers around AES-128-CBC, AES-CMAC and random seed generation so
//! the codecs share one set of error conversions.

use crate::types::{DerivedKey, Iv, KeyError, Seed};
use aes::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes128;
use cmac::{Cmac, Mac};
use rand::{rngs::OsRng, RngCore};
use smm2_format::layout::BLOCK_SIZE;
use subtle::ConstantTimeEq;
use thiserror::Error;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

const AES128_KEY_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid key length: expected 16, got {0}")]
    InvalidKeyLength(usize),

    #[error("Buffer length {0} is not a multiple of the AES block size")]
    UnalignedBuffer(usize),

    #[error("Key derivation failed: {0}")]
    Key(#[from] KeyError),
}

/// Encrypt `buf` in place with AES-128-CBC, no padding
pub fn aes_cbc_encrypt(key: &DerivedKey, iv: &Iv, buf: &mut [u8]) -> Result<(), CryptoError> {
    check_key(key)?;
    let len = buf.len();
    if len % BLOCK_SIZE != 0 {
        return Err(CryptoError::UnalignedBuffer(len));
    }
    let encryptor = Aes128CbcEnc::new_from_slices(key.as_slice(), iv.as_bytes())
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    encryptor
        .encrypt_padded_mut::<NoPadding>(buf, len)
        .map_err(|_| CryptoError::UnalignedBuffer(len))?;
    Ok(())
}

/// Decrypt `buf` in place with AES-128-CBC, no padding
pub fn aes_cbc_decrypt(key: &DerivedKey, iv: &Iv, buf: &mut [u8]) -> Result<(), CryptoError> {
    check_key(key)?;
    let len = buf.len();
    if len % BLOCK_SIZE != 0 {
        return Err(CryptoError::UnalignedBuffer(len));
    }
    let decryptor = Aes128CbcDec::new_from_slices(key.as_slice(), iv.as_bytes())
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(buf)
        .map_err(|_| CryptoError::UnalignedBuffer(len))?;
    Ok(())
}

/// AES-128-CMAC over `data`
pub fn aes_cmac(key: &DerivedKey, data: &[u8]) -> Result<[u8; BLOCK_SIZE], CryptoError> {
    check_key(key)?;
    let mut mac = <Cmac<Aes128> as Mac>::new_from_slice(key.as_slice())
        .map_err(|_| CryptoError::InvalidKeyLength(key.len()))?;
    mac.update(data);
    let mut tag = [0u8; BLOCK_SIZE];
    tag.copy_from_slice(&mac.finalize().into_bytes());
    Ok(tag)
}

/// Compare two tags in constant time
pub fn tags_match(calculated: &[u8], expected: &[u8]) -> bool {
    calculated.ct_eq(expected).into()
}

/// Generate a random derivation seed
pub fn generate_seed() -> Seed {
    let mut seed = [0u8; 16];
    OsRng.fill_bytes(&mut seed);
    Seed::from_bytes(seed)
}

/// Generate a random AES-CBC IV
pub fn generate_iv() -> Iv {
    let mut iv = [0u8; 16];
    OsRng.fill_bytes(&mut iv);
    Iv::from_bytes(iv)
}

fn check_key(key: &DerivedKey) -> Result<(), CryptoError> {
    if key.len() != AES128_KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength(key.len()));
    }
    Ok(())
}
