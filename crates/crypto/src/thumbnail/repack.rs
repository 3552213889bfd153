//! JPEG re-encoding for thumbnails that do not fit the container
//!
//! The game only accepts JPEG payloads shorter than 0x1BF9C bytes. Larger
//! images are decoded and re-encoded down a fixed quality ladder until one
//! fits.

use super::ThumbnailError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageResult, RgbImage};
use smm2_format::layout::THUMBNAIL_PAYLOAD_LIMIT;

/// Quality ladder tried, in order, when a thumbnail is too large
pub const DEFAULT_QUALITIES: [u8; 7] = [95, 85, 75, 65, 55, 45, 20];

/// Quality used when unpacking a container to a standalone JPEG
pub const UNPACK_QUALITY: u8 = 65;

/// A re-encoded payload and the quality that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repacked {
    pub bytes: Vec<u8>,
    pub quality: u8,
}

/// Decode any supported image and re-encode it as JPEG at `quality`
///
/// Trailing bytes after the JPEG end-of-image marker are ignored, so a whole
/// thumbnail container decodes to its picture.
pub fn reencode_jpeg(data: &[u8], quality: u8) -> ImageResult<Vec<u8>> {
    let image = image::load_from_memory(data)?.to_rgb8();
    encode_jpeg(&image, quality)
}

/// Re-encode `data` at the first quality whose output is below the limit
pub fn repack_until_fit(data: &[u8], qualities: &[u8]) -> Result<Repacked, ThumbnailError> {
    let image = image::load_from_memory(data)?.to_rgb8();

    let mut last_size = data.len();
    for &quality in qualities {
        let bytes = encode_jpeg(&image, quality)?;
        if bytes.len() < THUMBNAIL_PAYLOAD_LIMIT {
            return Ok(Repacked { bytes, quality });
        }
        last_size = bytes.len();
    }

    Err(ThumbnailError::TooLarge {
        size: last_size,
        limit: THUMBNAIL_PAYLOAD_LIMIT,
    })
}

pub(crate) fn encode_jpeg(image: &RgbImage, quality: u8) -> ImageResult<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
        encoder.encode_image(image)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 0x80])
        })
    }

    #[test]
    fn test_reencode_ignores_trailing_bytes() {
        let mut jpeg = encode_jpeg(&gradient(32, 24), 90).unwrap();
        jpeg.extend_from_slice(&[0u8; 1024]);

        let out = reencode_jpeg(&jpeg, UNPACK_QUALITY).unwrap();
        assert_eq!(&out[..2], &[0xFFu8, 0xD8]);
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_repack_uses_first_fitting_quality() {
        let mut jpeg = encode_jpeg(&gradient(64, 64), 90).unwrap();
        jpeg.resize(THUMBNAIL_PAYLOAD_LIMIT + 100, 0);

        let repacked = repack_until_fit(&jpeg, &DEFAULT_QUALITIES).unwrap();
        assert_eq!(repacked.quality, 95);
        assert!(repacked.bytes.len() < THUMBNAIL_PAYLOAD_LIMIT);
    }

    #[test]
    fn test_empty_ladder_is_too_large() {
        let jpeg = encode_jpeg(&gradient(8, 8), 90).unwrap();
        assert!(matches!(
            repack_until_fit(&jpeg, &[]),
            Err(ThumbnailError::TooLarge { size, limit: THUMBNAIL_PAYLOAD_LIMIT }) if size == jpeg.len()
        ));
    }

    #[test]
    fn test_undecodable_input() {
        assert!(matches!(
            repack_until_fit(&[0x13; 64], &DEFAULT_QUALITIES),
            Err(ThumbnailError::Image(_))
        ));
    }
}
