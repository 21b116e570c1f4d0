//! Smoothing and edge-map helpers shared by both extractors.
//!
//! Thin wrappers over `imageproc`: Gaussian blur for noise suppression
//! and Canny-style two-threshold hysteresis for the gradient edge map.

use image::GrayImage;

/// Minimum allowed hysteresis threshold.
///
/// A threshold of zero turns every pixel with any gradient into a
/// candidate edge, producing a degenerate edge map that swamps contour
/// tracing.
pub const MIN_THRESHOLD: f32 = 1.0;

/// Gaussian-blur a single-channel image.
///
/// Non-positive sigma returns the image unchanged (the underlying
/// `imageproc` function panics on `sigma <= 0.0`).
#[must_use = "returns the blurred image"]
pub fn gaussian(image: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return image.clone();
    }

    imageproc::filter::gaussian_blur_f32(image, sigma)
}

/// Binary edge map via gradient-magnitude hysteresis.
///
/// Pixels whose gradient magnitude exceeds `high` are edges; pixels
/// between `low` and `high` are edges only when 8-connected to one.
/// Returns 255 for edge pixels, 0 otherwise.
///
/// Both thresholds are clamped to at least [`MIN_THRESHOLD`] and `low`
/// to at most `high`.
#[must_use = "returns the binary edge map"]
pub fn hysteresis_edges(image: &GrayImage, low: f32, high: f32) -> GrayImage {
    let high = high.max(MIN_THRESHOLD);
    let low = low.max(MIN_THRESHOLD).min(high);
    imageproc::edges::canny(image, low, high)
}
