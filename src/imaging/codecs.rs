//! Concrete thumbnail encoders.
//!
//! ## Crate mapping
//!
//! | Format | Crate / function |
//! |---|---|
//! | WebP (lossy) | `webp::Encoder::encode_simple` (libwebp) |
//! | JPEG (baseline) | `image::codecs::jpeg::JpegEncoder` |
//!
//! The `image` crate only writes lossless WebP, which is why the lossy path
//! goes through `webp`.

use super::encoder::{CodecError, ThumbnailEncoder, ThumbnailFormat};
use super::params::Quality;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

/// Largest edge libwebp accepts.
const WEBP_MAX_DIMENSION: u32 = 16383;

/// Lossy WebP via libwebp.
pub struct WebpEncoder;

impl ThumbnailEncoder for WebpEncoder {
    fn format(&self) -> ThumbnailFormat {
        ThumbnailFormat::WebP
    }

    fn encode(&self, image: &RgbImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
        let (width, height) = image.dimensions();
        if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
            return Err(CodecError::Unavailable {
                format: ThumbnailFormat::WebP,
                reason: format!(
                    "{width}x{height} exceeds the {WEBP_MAX_DIMENSION}px WebP limit"
                ),
            });
        }
        let encoder = webp::Encoder::from_rgb(image.as_raw(), width, height);
        let memory = encoder
            .encode_simple(false, quality.compression() * 100.0)
            .map_err(|e| CodecError::EncodeFailed {
                format: ThumbnailFormat::WebP,
                reason: format!("{e:?}"),
            })?;
        Ok(memory.to_vec())
    }
}

/// Baseline JPEG via the `image` crate.
pub struct JpegEncoder;

impl ThumbnailEncoder for JpegEncoder {
    fn format(&self) -> ThumbnailFormat {
        ThumbnailFormat::Jpeg
    }

    fn encode(&self, image: &RgbImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
        // libjpeg-style quality is 1..=100; 0 would be rejected.
        let jpeg_quality = (quality.compression() * 100.0).round().clamp(1.0, 100.0) as u8;
        let mut bytes = Vec::new();
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, jpeg_quality)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| CodecError::EncodeFailed {
                format: ThumbnailFormat::Jpeg,
                reason: e.to_string(),
            })?;
        Ok(bytes)
    }
}
