//! Parameter types for thumbnail generation.
//!
//! - [`Quality`]: the single 0-100 setting. It drives both the linear scale
//!   of the thumbnail and the lossy encoder's compression quality.

/// Quality setting (0-100). Clamped on construction.
///
/// At 100 the thumbnail keeps the source resolution; below that every edge is
/// scaled by `value / 100`. Encoders receive the same value as compression
/// quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub const MAX: u32 = 100;

    pub fn new(value: u32) -> Self {
        Self(value.min(Self::MAX))
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Linear scale factor, `value / 100`.
    pub fn scale(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Compression quality as a `0.0..=1.0` encoder parameter.
    pub fn compression(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Full quality keeps the source pixels unscaled.
    pub fn keeps_original_size(self) -> bool {
        self.0 == Self::MAX
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}
