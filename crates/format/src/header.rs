//! Course container header
//!
//! The first 16 bytes of a course container are stored in the clear:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0x00 | 4 | format version |
//! | 0x04 | 2 | header size |
//! | 0x06 | 2 | flags |
//! | 0x08 | 4 | CRC32 of the decrypted payload |
//! | 0x0C | 4 | magic `SCDL` |

use crate::binary::{read_u16_le, read_u32_le, BinaryRead};
use crate::layout::{LEVEL_DEFAULT_VERSION, LEVEL_HEADER_SIZE, LEVEL_MAGIC};
use crate::FormatError;
use serde::{Deserialize, Serialize};
use std::io::{self, Cursor, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelHeader {
    pub version: u32,
    pub header_size: u16,
    pub flags: u16,
    pub crc32: u32,
    pub magic: [u8; 4],
}

impl LevelHeader {
    /// Header for a freshly encrypted payload with the given checksum
    pub fn new(crc32: u32) -> Self {
        Self {
            version: LEVEL_DEFAULT_VERSION,
            header_size: LEVEL_HEADER_SIZE as u16,
            flags: 0,
            crc32,
            magic: LEVEL_MAGIC,
        }
    }

    /// Parse the header from the start of `bytes`
    ///
    /// Only the first 16 bytes are read. The magic is not checked so that
    /// unusual headers round-trip unchanged; see [`Self::has_valid_magic`].
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < LEVEL_HEADER_SIZE {
            return Err(FormatError::InvalidLength {
                expected: LEVEL_HEADER_SIZE,
                got: bytes.len(),
            });
        }
        let mut cursor = Cursor::new(&bytes[..LEVEL_HEADER_SIZE]);
        // A 16-byte cursor cannot run short
        Self::read_from(&mut cursor).map_err(|_| FormatError::InvalidLength {
            expected: LEVEL_HEADER_SIZE,
            got: bytes.len(),
        })
    }

    /// Serialize into the 16-byte on-disk form
    pub fn to_bytes(&self) -> [u8; LEVEL_HEADER_SIZE] {
        let mut out = [0u8; LEVEL_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.version.to_le_bytes());
        out[4..6].copy_from_slice(&self.header_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.flags.to_le_bytes());
        out[8..12].copy_from_slice(&self.crc32.to_le_bytes());
        out[12..16].copy_from_slice(&self.magic);
        out
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == LEVEL_MAGIC
    }
}

impl BinaryRead for LevelHeader {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let version = read_u32_le(reader)?;
        let header_size = read_u16_le(reader)?;
        let flags = read_u16_le(reader)?;
        let crc32 = read_u32_le(reader)?;
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        Ok(Self {
            version,
            header_size,
            flags,
            crc32,
            magic,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_header_layout() {
        let header = LevelHeader::new(0x3b98_2a94);
        assert_eq!(
            header.to_bytes(),
            [
                0x01, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x94, 0x2a, 0x98, 0x3b, b'S', b'C',
                b'D', b'L'
            ]
        );
        assert!(header.has_valid_magic());
    }

    #[test]
    fn test_parse_preserves_unusual_fields() {
        let raw = [
            0x07, 0x00, 0x00, 0x00, 0x10, 0x00, 0x01, 0x00, 0xEF, 0xBE, 0xAD, 0xDE, b'X', b'Y',
            b'Z', b'W',
        ];
        let header = LevelHeader::parse(&raw).unwrap();
        assert_eq!(header.version, 7);
        assert_eq!(header.flags, 1);
        assert_eq!(header.crc32, 0xDEAD_BEEF);
        assert_eq!(header.to_bytes(), raw);
        assert_eq!(header.magic, *b"XYZW");
        assert!(!header.has_valid_magic());
    }

    #[test]
    fn test_to_bytes_reads_back() {
        let mut header = LevelHeader::new(0x5ab8_3d4c);
        header.flags = 0x0102;
        let bytes = header.to_bytes();
        let mut cursor = Cursor::new(&bytes[..]);
        assert_eq!(LevelHeader::read_from(&mut cursor).unwrap(), header);
        assert_eq!(cursor.position() as usize, LEVEL_HEADER_SIZE);
    }

    #[test]
    fn test_parse_short_buffer() {
        assert_eq!(
            LevelHeader::parse(&[0u8; 15]),
            Err(FormatError::InvalidLength {
                expected: 16,
                got: 15
            })
        );
    }
}
