//! Shared test utilities for the event-gallery test suite.
//!
//! Synthesizes real encoded images with the `image` crate so tests exercise
//! actual decoders instead of checked-in binary fixtures.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let photo = write_test_image(tmp.path(), "a.png", 800, 600, ImageFormat::Png);
//! let metadata = sample_metadata();
//! ```

use crate::metadata::EventMetadata;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

// =========================================================================
// Image fixtures
// =========================================================================

/// Encode a gradient image of the given size in `format`.
pub fn encode_test_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let rgb = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    // The GIF encoder wants RGBA input.
    let img = match format {
        ImageFormat::Gif => DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(rgb).to_rgba8()),
        _ => DynamicImage::ImageRgb8(rgb),
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

/// A half-transparent RGBA PNG.
pub fn rgba_test_image(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        image::Rgba([200, 100, 50, if x % 2 == 0 { 0 } else { 255 }])
    });
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Write an encoded test image to `dir/name` and return its path.
pub fn write_test_image(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode_test_image(width, height, format)).unwrap();
    path
}

/// Read the pixel dimensions of an image file.
pub fn image_dimensions(path: &Path) -> (u32, u32) {
    let img = image::load_from_memory(&std::fs::read(path).unwrap())
        .unwrap_or_else(|e| panic!("{} is not a decodable image: {e}", path.display()));
    (img.width(), img.height())
}

// =========================================================================
// Metadata fixtures
// =========================================================================

/// The launch event used throughout the tests.
pub fn sample_metadata() -> EventMetadata {
    EventMetadata::new("Launch", "Civic Hall", "Metropolis", "2025-03-01", "J. Doe")
}
