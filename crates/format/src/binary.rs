//! Little-endian binary helpers
//!
//! Readers for the fixed-width integers used by the container headers, plus
//! the trait implemented by structured fields.

use std::io::{self, Read};

/// Trait for types that can be read from binary format
pub trait BinaryRead: Sized {
    /// Read this type from a binary reader
    fn read_from<R: Read>(reader: &mut R) -> io::Result<Self>;
}

/// Read a u16 (little-endian) from a reader
pub fn read_u16_le<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

/// Read a u32 (little-endian) from a reader
pub fn read_u32_le<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_are_little_endian() {
        let mut cursor = Cursor::new(vec![0x9C, 0xBF, 0x01, 0x00, 0x10, 0x00]);
        assert_eq!(read_u32_le(&mut cursor).unwrap(), 0x0001_BF9C);
        assert_eq!(read_u16_le(&mut cursor).unwrap(), 0x0010);
    }

    #[test]
    fn test_short_read_fails() {
        let mut cursor = Cursor::new(vec![0x10]);
        assert!(read_u16_le(&mut cursor).is_err());
    }
}
