//! Gradient-based contour extraction for generic images.
//!
//! Works on a single intensity channel: smooth, build a hysteresis
//! edge map, trace outer boundaries, keep the largest. The red channel
//! separates the object of interest from typical backgrounds better
//! than luminance does, so [`red_channel`] is the usual front end.

use image::GrayImage;

use crate::components::count_foreground;
use crate::contour::{largest_by_area, outer_contours, rescale_points};
use crate::filter::{gaussian, hysteresis_edges};
use crate::scale::normalize_scale;
use crate::types::{ContourExtraction, PipelineConfig, RgbImage};

/// Extract the red channel as a single-channel image.
#[must_use]
pub fn red_channel(image: &RgbImage) -> GrayImage {
    let mut channel = GrayImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(channel.pixels_mut()) {
        dst.0[0] = src.0[0];
    }
    channel
}

/// Extract the largest outer boundary from an intensity image.
///
/// Returns points in original-image coordinates. An image with no edge
/// response yields an empty point set, which is a valid result.
#[must_use]
pub fn extract_gradient_contour(
    intensity: &GrayImage,
    config: &PipelineConfig,
) -> ContourExtraction {
    // 1. Bound the working resolution.
    let (working, factor) = normalize_scale(intensity, config.max_dimension);

    // 2. Suppress sensor noise ahead of the gradient.
    let smoothed = gaussian(&working, config.blur_sigma);

    // 3. Two-threshold hysteresis edge map.
    let edges = hysteresis_edges(&smoothed, config.canny_low, config.canny_high);
    let foreground_components = count_foreground(&edges);

    // 4-5. Outer boundaries, largest enclosed area wins.
    let points = largest_by_area(outer_contours(&edges)).unwrap_or_default();

    // 6. Back to original coordinates.
    ContourExtraction {
        points: rescale_points(&points, factor),
        foreground_components,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    /// Bright disk on a dark background.
    fn disk_image(size: u32, cx: i64, cy: i64, radius: i64) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let dx = i64::from(x) - cx;
            let dy = i64::from(y) - cy;
            if dx * dx + dy * dy <= radius * radius {
                image::Luma([230])
            } else {
                image::Luma([20])
            }
        })
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            max_dimension: 0,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn red_channel_selects_first_component() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgb([200, 10, 30]));
        image.put_pixel(1, 0, image::Rgb([5, 255, 255]));
        let channel = red_channel(&image);
        assert_eq!(channel.get_pixel(0, 0).0[0], 200);
        assert_eq!(channel.get_pixel(1, 0).0[0], 5);
    }

    #[test]
    fn uniform_image_yields_empty_point_set() {
        let image = GrayImage::from_pixel(64, 64, image::Luma([128]));
        let result = extract_gradient_contour(&image, &small_config());
        assert!(result.points.is_empty());
        assert_eq!(result.foreground_components, 0);
    }

    #[test]
    fn disk_boundary_is_found_near_the_circle() {
        let image = disk_image(100, 50, 50, 30);
        let result = extract_gradient_contour(&image, &small_config());
        assert!(
            result.points.len() > 20,
            "expected a substantial boundary, got {} points",
            result.points.len()
        );
        for p in &result.points {
            let dx = f64::from(p.x) - 50.0;
            let dy = f64::from(p.y) - 50.0;
            let r = (dx * dx + dy * dy).sqrt();
            assert!(
                (r - 30.0).abs() < 4.0,
                "({}, {}) is {r:.1}px from center, expected ~30",
                p.x,
                p.y
            );
        }
    }

    #[test]
    fn larger_disk_beats_smaller_disk() {
        let mut image = disk_image(200, 60, 60, 40);
        // Second, smaller disk well away from the first.
        for y in 0..200_i64 {
            for x in 0..200_i64 {
                let dx = x - 160;
                let dy = y - 160;
                if dx * dx + dy * dy <= 15 * 15 {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    image.put_pixel(x as u32, y as u32, image::Luma([230]));
                }
            }
        }
        let result = extract_gradient_contour(&image, &small_config());
        for p in &result.points {
            let dx = f64::from(p.x) - 60.0;
            let dy = f64::from(p.y) - 60.0;
            assert!(
                (dx * dx + dy * dy).sqrt() < 50.0,
                "point ({}, {}) belongs to the small disk",
                p.x,
                p.y
            );
        }
        assert!(result.foreground_components >= 2);
    }

    #[test]
    fn downscaled_points_map_back_to_original_grid() {
        let image = disk_image(400, 200, 200, 120);
        let config = PipelineConfig {
            max_dimension: 100,
            ..PipelineConfig::default()
        };
        let result = extract_gradient_contour(&image, &config);
        assert!(!result.points.is_empty());
        for p in &result.points {
            let dx = f64::from(p.x) - 200.0;
            let dy = f64::from(p.y) - 200.0;
            let r = (dx * dx + dy * dy).sqrt();
            assert!(
                (r - 120.0).abs() < 20.0,
                "rescaled point ({}, {}) at radius {r:.1}, expected ~120",
                p.x,
                p.y
            );
        }
    }

    #[test]
    fn result_is_deterministic() {
        let image = disk_image(100, 50, 50, 25);
        let a = extract_gradient_contour(&image, &small_config());
        let b = extract_gradient_contour(&image, &small_config());
        assert_eq!(a.points, b.points);
        assert_eq!(a.foreground_components, b.foreground_components);
    }

    #[test]
    fn points_stay_within_original_bounds() {
        let image = disk_image(150, 75, 75, 70);
        let result = extract_gradient_contour(&image, &small_config());
        for &Point { x, y } in &result.points {
            assert!(x < 150);
            assert!(y < 150);
        }
    }
}
