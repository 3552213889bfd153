//! Offsets and sizes of both container formats
//!
//! Offsets are relative to the start of the container buffer.

/// Size of an AES block, IV and CMAC tag
pub const BLOCK_SIZE: usize = 0x10;

/// Size of a derivation seed (four little-endian u32 words)
pub const SEED_SIZE: usize = 0x10;

// Course containers

/// Total size of an encrypted course container
pub const LEVEL_CONTAINER_SIZE: usize = 0x5C000;

/// Size of the plaintext header (version, CRC32, magic)
pub const LEVEL_HEADER_SIZE: usize = 0x10;

pub const LEVEL_VERSION_OFFSET: usize = 0x00;
pub const LEVEL_HEADER_SIZE_OFFSET: usize = 0x04;
pub const LEVEL_FLAGS_OFFSET: usize = 0x06;
pub const LEVEL_CRC_OFFSET: usize = 0x08;
pub const LEVEL_MAGIC_OFFSET: usize = 0x0C;

/// Start of the AES-CBC ciphertext
pub const LEVEL_PAYLOAD_OFFSET: usize = 0x10;

/// Size of the decrypted course payload
pub const LEVEL_PAYLOAD_SIZE: usize = 0x5BFC0;

/// Size of a decrypted payload with its header still attached
pub const LEVEL_HEADER_AND_PAYLOAD_SIZE: usize = LEVEL_HEADER_SIZE + LEVEL_PAYLOAD_SIZE;

pub const LEVEL_IV_OFFSET: usize = 0x5BFD0;
pub const LEVEL_SEED_OFFSET: usize = 0x5BFE0;
pub const LEVEL_CMAC_OFFSET: usize = 0x5BFF0;

/// Magic tag stored at [`LEVEL_MAGIC_OFFSET`]
pub const LEVEL_MAGIC: [u8; 4] = *b"SCDL";

/// Header version written when a header is synthesised
pub const LEVEL_DEFAULT_VERSION: u32 = 1;

// Thumbnail containers

/// Total size of an encrypted thumbnail container
pub const THUMBNAIL_CONTAINER_SIZE: usize = 0x1C000;

/// Largest JPEG payload the container can hold; also the HMAC coverage
pub const THUMBNAIL_PAYLOAD_LIMIT: usize = 0x1BF9C;

pub const THUMBNAIL_MARKER_OFFSET: usize = 0x1BF9C;
pub const THUMBNAIL_HMAC_OFFSET: usize = 0x1BFA0;
pub const THUMBNAIL_SEED_OFFSET: usize = 0x1BFC0;
pub const THUMBNAIL_PADDING_OFFSET: usize = 0x1BFD0;

/// Fixed bytes at [`THUMBNAIL_MARKER_OFFSET`] (0x1BF9C as a little-endian u32)
pub const THUMBNAIL_MARKER: [u8; 4] = [0x9C, 0xBF, 0x01, 0x00];

/// Size of the HMAC-SHA256 tag
pub const THUMBNAIL_HMAC_SIZE: usize = 0x20;

/// Size of the zero padding that closes a thumbnail container
pub const THUMBNAIL_PADDING_SIZE: usize = THUMBNAIL_CONTAINER_SIZE - THUMBNAIL_PADDING_OFFSET;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_regions_are_contiguous() {
        assert_eq!(LEVEL_PAYLOAD_OFFSET + LEVEL_PAYLOAD_SIZE, LEVEL_IV_OFFSET);
        assert_eq!(LEVEL_IV_OFFSET + BLOCK_SIZE, LEVEL_SEED_OFFSET);
        assert_eq!(LEVEL_SEED_OFFSET + SEED_SIZE, LEVEL_CMAC_OFFSET);
        assert_eq!(LEVEL_CMAC_OFFSET + BLOCK_SIZE, LEVEL_CONTAINER_SIZE);
        assert_eq!(LEVEL_PAYLOAD_SIZE % BLOCK_SIZE, 0);
    }

    #[test]
    fn test_thumbnail_regions_are_contiguous() {
        assert_eq!(THUMBNAIL_MARKER_OFFSET + 4, THUMBNAIL_HMAC_OFFSET);
        assert_eq!(THUMBNAIL_HMAC_OFFSET + THUMBNAIL_HMAC_SIZE, THUMBNAIL_SEED_OFFSET);
        assert_eq!(THUMBNAIL_SEED_OFFSET + SEED_SIZE, THUMBNAIL_PADDING_OFFSET);
        assert_eq!(THUMBNAIL_PADDING_SIZE, 0x30);
    }

    #[test]
    fn test_marker_encodes_payload_limit() {
        assert_eq!(
            u32::from_le_bytes(THUMBNAIL_MARKER) as usize,
            THUMBNAIL_PAYLOAD_LIMIT
        );
    }
}
