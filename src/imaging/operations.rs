//! High-level thumbnail operation.
//!
//! Decode → scale (per [`Quality`]) → flatten to RGB → encode through the
//! [`EncoderChain`]. Pure transform: bytes in, bytes + format out.

use super::calculations::scaled_dimensions;
use super::encoder::{CodecError, EncoderChain, ThumbnailFormat};
use super::params::Quality;
use image::DynamicImage;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error(transparent)]
    Encode(#[from] CodecError),
}

/// A generated thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub format: ThumbnailFormat,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Decode an image from its encoded bytes; the container format is sniffed
/// from the content, not the filename.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, ThumbnailError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Scale a decoded image for the given quality.
///
/// Full quality returns the image untouched. Otherwise Lanczos3 resampling,
/// which widens its kernel on downscale and so antialiases.
pub fn scale(image: DynamicImage, quality: Quality) -> DynamicImage {
    let source = (image.width(), image.height());
    let (width, height) = scaled_dimensions(source, quality);
    if (width, height) == source {
        return image;
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}

/// Generate a thumbnail from encoded source bytes.
pub fn generate_thumbnail(
    encoders: &EncoderChain,
    source: &[u8],
    quality: Quality,
) -> Result<Thumbnail, ThumbnailError> {
    let decoded = decode(source)?;
    let scaled = scale(decoded, quality);
    let rgb = scaled.to_rgb8();
    let encoded = encoders.encode(&rgb, quality)?;
    Ok(Thumbnail {
        bytes: encoded.bytes,
        format: encoded.format,
        width: rgb.width(),
        height: rgb.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::encoder::tests::{FailingEncoder, RecordingEncoder};
    use crate::test_helpers::{encode_test_image, rgba_test_image};
    use image::ImageFormat;

    #[test]
    fn full_quality_keeps_dimensions() {
        let png = encode_test_image(120, 90, ImageFormat::Png);
        let thumb = generate_thumbnail(&EncoderChain::standard(), &png, Quality::new(100)).unwrap();
        assert_eq!((thumb.width, thumb.height), (120, 90));
        let decoded = image::load_from_memory(&thumb.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 90));
    }

    #[test]
    fn half_quality_halves_dimensions() {
        let png = encode_test_image(200, 100, ImageFormat::Png);
        let thumb = generate_thumbnail(&EncoderChain::standard(), &png, Quality::new(50)).unwrap();
        assert_eq!((thumb.width, thumb.height), (100, 50));
        assert_eq!(thumb.format, ThumbnailFormat::WebP);
        assert_eq!(thumb.extension(), "webp");
    }

    #[test]
    fn zero_quality_is_one_pixel() {
        let png = encode_test_image(40, 30, ImageFormat::Png);
        let thumb = generate_thumbnail(&EncoderChain::standard(), &png, Quality::new(0)).unwrap();
        assert_eq!((thumb.width, thumb.height), (1, 1));
    }

    #[test]
    fn decodes_by_content_not_name() {
        for format in [ImageFormat::Jpeg, ImageFormat::Gif, ImageFormat::Bmp] {
            let bytes = encode_test_image(50, 20, format);
            let thumb =
                generate_thumbnail(&EncoderChain::standard(), &bytes, Quality::new(80)).unwrap();
            assert_eq!((thumb.width, thumb.height), (40, 16), "{format:?}");
        }
    }

    #[test]
    fn alpha_is_discarded_before_encoding() {
        // Every pixel is (200, 100, 50); alternate columns are fully transparent.
        let png = rgba_test_image(10, 10);
        let chain = EncoderChain::new(vec![Box::new(crate::imaging::codecs::JpegEncoder)]);
        let thumb = generate_thumbnail(&chain, &png, Quality::new(100)).unwrap();

        let decoded = image::load_from_memory(&thumb.bytes).unwrap();
        assert!(!decoded.color().has_alpha());
        let rgb = decoded.to_rgb8();
        // Transparent and opaque columns keep the same color, nothing is blended to black.
        for x in [0, 1] {
            let image::Rgb([r, g, b]) = *rgb.get_pixel(x, 5);
            assert!(r > 150 && g > 60 && g < 140 && b < 100, "column {x}: {r},{g},{b}");
        }
    }

    #[test]
    fn encoder_receives_scaled_buffer_and_quality() {
        let png = encode_test_image(100, 60, ImageFormat::Png);
        let recorder = std::sync::Arc::new(RecordingEncoder::new(ThumbnailFormat::WebP));

        struct Shared(std::sync::Arc<RecordingEncoder>);
        impl crate::imaging::ThumbnailEncoder for Shared {
            fn format(&self) -> ThumbnailFormat {
                self.0.format
            }
            fn encode(
                &self,
                image: &image::RgbImage,
                quality: Quality,
            ) -> Result<Vec<u8>, CodecError> {
                self.0.encode(image, quality)
            }
        }

        let chain = EncoderChain::new(vec![Box::new(Shared(recorder.clone()))]);
        generate_thumbnail(&chain, &png, Quality::new(30)).unwrap();
        assert_eq!(*recorder.calls.lock().unwrap(), vec![(30, 18, 30)]);
    }

    #[test]
    fn falls_back_to_jpeg_when_webp_unavailable() {
        let png = encode_test_image(80, 80, ImageFormat::Png);
        let chain = EncoderChain::new(vec![
            Box::new(FailingEncoder(ThumbnailFormat::WebP)),
            Box::new(crate::imaging::codecs::JpegEncoder),
        ]);
        let thumb = generate_thumbnail(&chain, &png, Quality::new(50)).unwrap();
        assert_eq!(thumb.format, ThumbnailFormat::Jpeg);
        assert_eq!(thumb.extension(), "jpg");
        assert_eq!(&thumb.bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn garbage_input_is_decode_error() {
        let result = generate_thumbnail(&EncoderChain::standard(), b"not an image", Quality::new(80));
        assert!(matches!(result, Err(ThumbnailError::Decode(_))));
    }

    #[test]
    fn both_encoders_failing_is_encode_error() {
        let png = encode_test_image(10, 10, ImageFormat::Png);
        let chain = EncoderChain::new(vec![
            Box::new(FailingEncoder(ThumbnailFormat::WebP)),
            Box::new(FailingEncoder(ThumbnailFormat::Jpeg)),
        ]);
        let result = generate_thumbnail(&chain, &png, Quality::new(80));
        assert!(matches!(result, Err(ThumbnailError::Encode(CodecError::AllFailed(_)))));
    }
}
