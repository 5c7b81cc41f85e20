//! Thumbnail generation: decode, scale, lossy re-encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::load_from_memory` (JPEG, PNG, GIF, BMP, TIFF, WebP) |
//! | **Scale** | `DynamicImage::resize_exact` with `Lanczos3` |
//! | **Encode** | [`EncoderChain`]: lossy WebP, then baseline JPEG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: [`Quality`]
//! - **Encoder**: [`ThumbnailEncoder`] trait + ordered [`EncoderChain`]
//! - **Codecs**: the WebP and JPEG encoders
//! - **Operations**: [`generate_thumbnail`], combining all of the above

mod calculations;
pub mod codecs;
pub mod encoder;
pub mod operations;
mod params;

pub use calculations::scaled_dimensions;
pub use encoder::{CodecError, EncodedImage, EncoderChain, ThumbnailEncoder, ThumbnailFormat};
pub use operations::{Thumbnail, ThumbnailError, generate_thumbnail};
pub use params::Quality;

/// Input extensions offered when a directory of photos is expanded.
///
/// The first five are what the organizer has always accepted; WebP and TIFF
/// decoders are compiled in as well.
pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "bmp", "webp", "tif", "tiff"];

/// Whether a file extension (any case) is a supported input.
pub fn is_supported_extension(extension: &str) -> bool {
    SUPPORTED_INPUT_EXTENSIONS
        .iter()
        .any(|e| e.eq_ignore_ascii_case(extension))
}
