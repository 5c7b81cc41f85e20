//! Pure calculation functions for thumbnail dimensions.
//!
//! No I/O, no pixels.

use super::params::Quality;

/// Thumbnail dimensions for a source of `source` pixels at `quality`.
///
/// At full quality the source size is returned unchanged. Otherwise each edge
/// is `round(edge * quality / 100)`, never below 1px.
///
/// # Examples
/// ```
/// # use event_gallery::imaging::{Quality, scaled_dimensions};
/// assert_eq!(scaled_dimensions((800, 600), Quality::new(80)), (640, 480));
/// assert_eq!(scaled_dimensions((100, 50), Quality::new(0)), (1, 1));
/// ```
pub fn scaled_dimensions(source: (u32, u32), quality: Quality) -> (u32, u32) {
    if quality.keeps_original_size() {
        return source;
    }
    let (src_w, src_h) = source;
    let scale = quality.scale();
    let w = ((src_w as f64 * scale).round() as u32).max(1);
    let h = ((src_h as f64 * scale).round() as u32).max(1);
    (w, h)
}
