//! Thumbnail encoder trait and the ordered fallback chain.
//!
//! An [`EncoderChain`] holds candidate encoders in preference order. Encoding
//! tries each one in turn and returns the first success together with the
//! format that actually produced the bytes, so callers never assume the
//! preferred format was written. Appending a format is a one-line change to
//! [`EncoderChain::standard`].
//!
//! | Position | Encoder | Extension |
//! |---|---|---|
//! | 1 | lossy WebP ([`WebpEncoder`](super::codecs::WebpEncoder)) | `webp` |
//! | 2 | baseline JPEG ([`JpegEncoder`](super::codecs::JpegEncoder)) | `jpg` |

use super::params::Quality;
use image::RgbImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("{format} encoder unavailable: {reason}")]
    Unavailable {
        format: ThumbnailFormat,
        reason: String,
    },
    #[error("{format} encoding failed: {reason}")]
    EncodeFailed {
        format: ThumbnailFormat,
        reason: String,
    },
    #[error("no thumbnail encoder succeeded ({})", .0.join("; "))]
    AllFailed(Vec<String>),
}

/// Output formats a thumbnail can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailFormat {
    WebP,
    Jpeg,
}

impl ThumbnailFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
        }
    }
}

impl std::fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebP => f.write_str("WebP"),
            Self::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Encoded thumbnail bytes plus the format that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ThumbnailFormat,
}

/// A single lossy encoder. Input is always opaque RGB; alpha has already been
/// discarded.
pub trait ThumbnailEncoder: Send + Sync {
    fn format(&self) -> ThumbnailFormat;

    fn encode(&self, image: &RgbImage, quality: Quality) -> Result<Vec<u8>, CodecError>;
}

/// Candidate encoders in preference order.
pub struct EncoderChain {
    encoders: Vec<Box<dyn ThumbnailEncoder>>,
}

impl EncoderChain {
    pub fn new(encoders: Vec<Box<dyn ThumbnailEncoder>>) -> Self {
        Self { encoders }
    }

    /// WebP first, JPEG as fallback.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(super::codecs::WebpEncoder),
            Box::new(super::codecs::JpegEncoder),
        ])
    }

    /// Append a lower-priority encoder.
    pub fn with(mut self, encoder: Box<dyn ThumbnailEncoder>) -> Self {
        self.encoders.push(encoder);
        self
    }

    pub fn formats(&self) -> Vec<ThumbnailFormat> {
        self.encoders.iter().map(|e| e.format()).collect()
    }

    /// Encode with the first encoder that succeeds.
    pub fn encode(&self, image: &RgbImage, quality: Quality) -> Result<EncodedImage, CodecError> {
        let mut failures = Vec::new();
        for encoder in &self.encoders {
            match encoder.encode(image, quality) {
                Ok(bytes) => {
                    return Ok(EncodedImage {
                        bytes,
                        format: encoder.format(),
                    });
                }
                Err(e) => {
                    tracing::debug!("falling back from {}: {}", encoder.format(), e);
                    failures.push(e.to_string());
                }
            }
        }
        if failures.is_empty() {
            failures.push("no encoders configured".to_string());
        }
        Err(CodecError::AllFailed(failures))
    }
}

impl Default for EncoderChain {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Encoder that always reports itself unavailable.
    pub struct FailingEncoder(pub ThumbnailFormat);

    impl ThumbnailEncoder for FailingEncoder {
        fn format(&self) -> ThumbnailFormat {
            self.0
        }

        fn encode(&self, _image: &RgbImage, _quality: Quality) -> Result<Vec<u8>, CodecError> {
            Err(CodecError::Unavailable {
                format: self.0,
                reason: "simulated".to_string(),
            })
        }
    }

    /// Encoder that records the calls it receives and returns fixed bytes.
    /// Uses Mutex (not RefCell) so it is Sync like the real encoders.
    pub struct RecordingEncoder {
        pub format: ThumbnailFormat,
        pub calls: Mutex<Vec<(u32, u32, u32)>>,
    }

    impl RecordingEncoder {
        pub fn new(format: ThumbnailFormat) -> Self {
            Self {
                format,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ThumbnailEncoder for RecordingEncoder {
        fn format(&self) -> ThumbnailFormat {
            self.format
        }

        fn encode(&self, image: &RgbImage, quality: Quality) -> Result<Vec<u8>, CodecError> {
            self.calls
                .lock()
                .unwrap()
                .push((image.width(), image.height(), quality.value()));
            Ok(vec![1, 2, 3])
        }
    }

    fn small_image() -> RgbImage {
        RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]))
    }

    #[test]
    fn extensions() {
        assert_eq!(ThumbnailFormat::WebP.extension(), "webp");
        assert_eq!(ThumbnailFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn first_success_wins() {
        let chain = EncoderChain::new(vec![
            Box::new(RecordingEncoder::new(ThumbnailFormat::WebP)),
            Box::new(FailingEncoder(ThumbnailFormat::Jpeg)),
        ]);
        let out = chain.encode(&small_image(), Quality::new(70)).unwrap();
        assert_eq!(out.format, ThumbnailFormat::WebP);
        assert_eq!(out.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn falls_back_when_preferred_fails() {
        let chain = EncoderChain::new(vec![
            Box::new(FailingEncoder(ThumbnailFormat::WebP)),
            Box::new(RecordingEncoder::new(ThumbnailFormat::Jpeg)),
        ]);
        let out = chain.encode(&small_image(), Quality::new(70)).unwrap();
        assert_eq!(out.format, ThumbnailFormat::Jpeg);
    }

    #[test]
    fn all_failing_reports_every_reason() {
        let chain = EncoderChain::new(vec![
            Box::new(FailingEncoder(ThumbnailFormat::WebP)),
            Box::new(FailingEncoder(ThumbnailFormat::Jpeg)),
        ]);
        let err = chain.encode(&small_image(), Quality::new(70)).unwrap_err();
        match err {
            CodecError::AllFailed(reasons) => {
                assert_eq!(reasons.len(), 2);
                assert!(reasons[0].contains("WebP"));
                assert!(reasons[1].contains("JPEG"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_chain_fails() {
        let chain = EncoderChain::new(Vec::new());
        assert!(matches!(
            chain.encode(&small_image(), Quality::default()),
            Err(CodecError::AllFailed(_))
        ));
    }

    #[test]
    fn with_appends_in_order() {
        let chain = EncoderChain::new(vec![Box::new(FailingEncoder(ThumbnailFormat::WebP))])
            .with(Box::new(RecordingEncoder::new(ThumbnailFormat::Jpeg)));
        assert_eq!(
            chain.formats(),
            vec![ThumbnailFormat::WebP, ThumbnailFormat::Jpeg]
        );
    }
}
