//! Overlay renderer: mark extracted points on the source image.
//!
//! Draws a filled anti-aliased dot at every boundary point via
//! `tiny-skia`, composited over the original photo, and encodes the
//! result as PNG. Useful for eyeballing what the extractor latched
//! onto.

use horizon_pipeline::Point;
use image::RgbImage;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Marker radius in pixels.
const MARKER_RADIUS: f32 = 3.0;

/// Marker color (opaque blue).
const MARKER_RGBA: (u8, u8, u8, u8) = (0, 0, 255, 255);

/// Errors from overlay rendering.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// The source image has a zero dimension.
    #[error("cannot render overlay on a {width}x{height} image")]
    ZeroDimensions {
        /// Source image width.
        width: u32,
        /// Source image height.
        height: u32,
    },

    /// PNG encoding failed.
    #[error("failed to encode overlay PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Render point markers over the source image.
///
/// # Errors
///
/// Returns [`OverlayError::ZeroDimensions`] when the source image has
/// no pixels to draw on.
pub fn render_overlay(image: &RgbImage, points: &[Point]) -> Result<RgbImage, OverlayError> {
    let (width, height) = image.dimensions();
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Err(OverlayError::ZeroDimensions { width, height });
    };

    // Copy the photo in as fully-opaque RGBA; opaque premultiplied
    // equals straight, so no conversion is needed on the way in.
    let data = pixmap.data_mut();
    for (i, pixel) in image.pixels().enumerate() {
        let off = i * 4;
        data[off] = pixel.0[0];
        data[off + 1] = pixel.0[1];
        data[off + 2] = pixel.0[2];
        data[off + 3] = 255;
    }

    if let Some(path) = marker_path(points) {
        let mut paint = Paint::default();
        let (r, g, b, a) = MARKER_RGBA;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    // Everything stayed opaque, so premultiplied data reads back as
    // straight RGB.
    let mut out = RgbImage::new(width, height);
    let data = pixmap.data();
    for (i, pixel) in out.pixels_mut().enumerate() {
        let off = i * 4;
        *pixel = image::Rgb([data[off], data[off + 1], data[off + 2]]);
    }
    Ok(out)
}

/// Render the overlay and encode it as PNG bytes.
///
/// # Errors
///
/// Returns [`OverlayError::ZeroDimensions`] for an empty source image
/// and [`OverlayError::Encode`] if PNG encoding fails.
pub fn overlay_png(image: &RgbImage, points: &[Point]) -> Result<Vec<u8>, OverlayError> {
    let rendered = render_overlay(image, points)?;
    let mut bytes = Vec::new();
    rendered.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )?;
    Ok(bytes)
}

/// One sub-path per point: a filled circle of [`MARKER_RADIUS`].
///
/// Returns `None` for an empty point set.
#[allow(clippy::cast_precision_loss)]
fn marker_path(points: &[Point]) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for p in points {
        pb.push_circle(p.x as f32, p.y as f32, MARKER_RADIUS);
    }
    pb.finish()
}
