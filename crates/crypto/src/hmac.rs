//! HMAC operations with constant-time verification
//!
//! Thumbnail containers are authenticated with HMAC-SHA256 keyed by a
//! derived 16-byte key. Verification compares tags in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Size of an HMAC-SHA256 tag
pub const HMAC_SHA256_SIZE: usize = 32;

#[derive(Debug, Error)]
pub enum HmacError {
    #[error("HMAC initialization failed")]
    InitFailed,

    #[error("HMAC verification failed")]
    VerificationFailed,
}

/// Calculate HMAC-SHA256 over data
pub fn calculate_hmac(key: &[u8], data: &[u8]) -> Result<[u8; HMAC_SHA256_SIZE], HmacError> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| HmacError::InitFailed)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Verify an HMAC-SHA256 tag using constant-time comparison
pub fn verify_hmac(key: &[u8], data: &[u8], expected: &[u8]) -> Result<(), HmacError> {
    let calculated = calculate_hmac(key, data)?;
    if calculated.ct_eq(expected).into() {
        Ok(())
    } else {
        Err(HmacError::VerificationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_hmac_known_answer() {
        // RFC 4231 test case 2
        let tag = calculate_hmac(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            hex::encode(tag),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_roundtrip() {
        let key = [7u8; 16];
        let tag = calculate_hmac(&key, b"thumbnail").unwrap();
        assert!(verify_hmac(&key, b"thumbnail", &tag).is_ok());
    }

    #[test]
    fn test_verify_fails_on_wrong_tag() {
        let key = [7u8; 16];
        let mut tag = calculate_hmac(&key, b"thumbnail").unwrap();

        tag[0] ^= 1;
        assert!(matches!(
            verify_hmac(&key, b"thumbnail", &tag),
            Err(HmacError::VerificationFailed)
        ));

        tag[0] ^= 1;
        tag[31] ^= 0x80;
        assert!(verify_hmac(&key, b"thumbnail", &tag).is_err());

        // Truncated tags never match
        assert!(verify_hmac(&key, b"thumbnail", &tag[..16]).is_err());
    }
}
