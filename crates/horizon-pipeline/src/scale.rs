//! Scale normalization to a bounded working resolution.
//!
//! Both extractors downscale their input so the longer side is at most
//! the configured `max_dimension` before running any expensive
//! image-space work, then map the resulting contour points back to the
//! original grid. The bound only caps cost; it must never change which
//! object is chosen.

use image::{ImageBuffer, Pixel, imageops};

/// Resize `image` so its longer side is at most `max_dimension`,
/// preserving aspect ratio (bilinear, deterministic).
///
/// Returns the working image and the factor that maps working
/// coordinates back to original coordinates: `original_max /
/// max_dimension` when downscaling occurred, `1.0` otherwise. A
/// `max_dimension` of zero disables the bound entirely.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn normalize_scale<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    max_dimension: u32,
) -> (ImageBuffer<P, Vec<P::Subpixel>>, f64)
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let (w, h) = image.dimensions();
    let long_axis = w.max(h);

    if max_dimension == 0 || long_axis <= max_dimension {
        return (image.clone(), 1.0);
    }

    let scale = f64::from(max_dimension) / f64::from(long_axis);
    let (new_w, new_h) = if w >= h {
        (
            max_dimension,
            ((f64::from(h) * scale).round() as u32).max(1),
        )
    } else {
        (
            ((f64::from(w) * scale).round() as u32).max(1),
            max_dimension,
        )
    };

    let resized = imageops::resize(image, new_w, new_h, imageops::FilterType::Triangle);
    (resized, f64::from(long_axis) / f64::from(max_dimension))
}
