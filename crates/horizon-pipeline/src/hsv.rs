//! RGB to HSV conversion on the 8-bit integer scale.
//!
//! Hue is reported in [0, 180] (half-degrees) and saturation/value in
//! [0, 255], matching the convention the hue-band thresholds were tuned
//! against. Used by the color segmentation extractor and by the
//! classifier's mean-saturation heuristic.

use crate::types::RgbImage;

/// Convert one 8-bit RGB pixel to (hue, saturation, value).
///
/// Hue is half-degrees in [0, 180], saturation and value are [0, 255].
/// Achromatic pixels (zero delta) report hue 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let value = max;

    let delta = f64::from(max) - f64::from(min);
    let saturation = if max == 0 {
        0
    } else {
        (delta / f64::from(max) * 255.0).round() as u8
    };

    if delta == 0.0 {
        return (0, saturation, value);
    }

    let (rf, gf, bf) = (f64::from(r), f64::from(g), f64::from(b));
    let mut hue_deg = if max == r {
        60.0 * ((gf - bf) / delta)
    } else if max == g {
        60.0 * ((bf - rf) / delta) + 120.0
    } else {
        60.0 * ((rf - gf) / delta) + 240.0
    };
    if hue_deg < 0.0 {
        hue_deg += 360.0;
    }

    ((hue_deg / 2.0).round() as u8, saturation, value)
}

/// Mean saturation of an image on the [0, 255] scale.
///
/// Returns 0.0 for an empty image.
#[must_use]
pub fn mean_saturation(image: &RgbImage) -> f64 {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return 0.0;
    }

    let total: u64 = image
        .pixels()
        .map(|p| {
            let (_, s, _) = rgb_to_hsv(p.0[0], p.0[1], p.0[2]);
            u64::from(s)
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    {
        total as f64 / pixel_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
    }

    #[test]
    fn pure_green() {
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
    }

    #[test]
    fn pure_blue() {
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn white_has_zero_saturation() {
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 255));
    }

    #[test]
    fn black_has_zero_value() {
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
    }

    #[test]
    fn gray_is_achromatic() {
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
    }

    #[test]
    fn red_with_negative_hue_wraps_high() {
        // Slightly magenta-ish red: g < b pushes the raw hue negative,
        // which must wrap into the high end of the scale.
        let (h, _, _) = rgb_to_hsv(255, 0, 40);
        assert!(h > 170, "expected wrapped hue near 180, got {h}");
    }

    #[test]
    fn orange_lands_in_the_brown_band() {
        // 200/100/30 is a brownish orange: hue around 25 degrees, so
        // ~13 on the half-degree scale.
        let (h, s, v) = rgb_to_hsv(200, 100, 30);
        assert!((10..=25).contains(&h), "hue {h} outside brown band");
        assert!(s > 100);
        assert!((50..=200).contains(&v));
    }

    #[test]
    fn mean_saturation_of_gray_image_is_zero() {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([90, 90, 90]));
        assert!(mean_saturation(&img).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_saturation_of_pure_red_image_is_full() {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([255, 0, 0]));
        assert!((mean_saturation(&img) - 255.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_saturation_of_empty_image_is_zero() {
        let img = RgbImage::new(0, 0);
        assert!(mean_saturation(&img).abs() < f64::EPSILON);
    }
}
