//! Common test utilities for smm2 integration tests
//!
//! Shared builders for course payloads and thumbnail images.

#![allow(dead_code)]

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use rand::{rngs::StdRng, RngCore, SeedableRng};

pub use smm2::prelude::*;

/// Deterministic pseudo-random course payload
pub fn random_payload(seed: u64) -> Vec<u8> {
    let mut payload = vec![0u8; LEVEL_PAYLOAD_SIZE];
    StdRng::seed_from_u64(seed).fill_bytes(&mut payload);
    payload
}

/// Course payload with a repeating byte pattern
pub fn patterned_payload() -> Vec<u8> {
    (0..LEVEL_PAYLOAD_SIZE).map(|i| (i % 251) as u8).collect()
}

/// Encode an RGB image as JPEG
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Vec<u8> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode_image(image)
        .unwrap();
    out
}

/// Small gradient JPEG at the game's thumbnail aspect ratio
pub fn gradient_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 0x60])
    });
    encode_jpeg(&image, 90)
}

/// Random noise; JPEG cannot compress it well at any quality
pub fn noise_image(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut raw = vec![0u8; (width * height * 3) as usize];
    rng.fill_bytes(&mut raw);
    RgbImage::from_raw(width, height, raw).unwrap()
}
