//! Color segmentation contour extraction for phone photos.
//!
//! Phone pipelines boost saturation aggressively, which corrupts
//! gradients but makes hue a reliable separator. The extractor builds a
//! foreground mask from fixed hue bands, cleans it morphologically,
//! and traces the largest region's outer boundary.

use image::GrayImage;
use imageproc::distance_transform::Norm;

use crate::components::count_foreground;
use crate::contour::{compress_collinear, largest_by_area, outer_contours, rescale_points};
use crate::filter::gaussian;
use crate::hsv::rgb_to_hsv;
use crate::scale::normalize_scale;
use crate::types::{ContourExtraction, PipelineConfig, RgbImage};

/// An inclusive HSV threshold box on the 0-180 hue / 0-255 sat-val
/// scale.
#[derive(Debug, Clone, Copy)]
pub struct HueBand {
    /// Inclusive hue range in half-degrees.
    pub hue: (u8, u8),
    /// Inclusive saturation range.
    pub saturation: (u8, u8),
    /// Inclusive value range.
    pub value: (u8, u8),
}

impl HueBand {
    const fn contains(self, h: u8, s: u8, v: u8) -> bool {
        h >= self.hue.0
            && h <= self.hue.1
            && s >= self.saturation.0
            && s <= self.saturation.1
            && v >= self.value.0
            && v <= self.value.1
    }
}

/// Hue bands tuned for the strongly-colored objects this extractor
/// targets. Red needs two bands because its hue wraps at 0/180.
pub const FOREGROUND_BANDS: [HueBand; 5] = [
    // Red, low side of the wrap.
    HueBand {
        hue: (0, 10),
        saturation: (120, 255),
        value: (70, 255),
    },
    // Red, high side of the wrap.
    HueBand {
        hue: (170, 180),
        saturation: (120, 255),
        value: (70, 255),
    },
    // Blue.
    HueBand {
        hue: (100, 130),
        saturation: (150, 255),
        value: (70, 255),
    },
    // Green.
    HueBand {
        hue: (35, 85),
        saturation: (100, 255),
        value: (70, 255),
    },
    // Brown and orange; the value cap keeps bright skin tones out.
    HueBand {
        hue: (10, 25),
        saturation: (100, 255),
        value: (50, 200),
    },
];

/// Binary mask of pixels falling in any foreground hue band.
#[must_use]
pub fn hue_band_mask(image: &RgbImage) -> GrayImage {
    let mut mask = GrayImage::new(image.width(), image.height());
    for (src, dst) in image.pixels().zip(mask.pixels_mut()) {
        let (h, s, v) = rgb_to_hsv(src.0[0], src.0[1], src.0[2]);
        if FOREGROUND_BANDS.iter().any(|band| band.contains(h, s, v)) {
            dst.0[0] = 255;
        }
    }
    mask
}

/// Morphological cleanup: closing to fill pinholes, then opening to
/// drop isolated speckles. `radius` 2 gives the 5x5 square element.
#[must_use]
pub fn clean_mask(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    let closed = imageproc::morphology::close(mask, Norm::LInf, radius);
    imageproc::morphology::open(&closed, Norm::LInf, radius)
}

/// Extract the largest foreground boundary by hue segmentation.
///
/// Returns points in original-image coordinates, run through collinear
/// compression for a leaner representation. An image where no pixel
/// survives thresholding yields an empty point set.
#[must_use]
pub fn extract_color_contour(image: &RgbImage, config: &PipelineConfig) -> ContourExtraction {
    // 1. Bound the working resolution.
    let (working, factor) = normalize_scale(image, config.max_dimension);

    // 2-3. HSV thresholding into a binary mask.
    let mask = hue_band_mask(&working);

    // 4. Close-then-open cleanup.
    let cleaned = clean_mask(&mask, config.morph_radius);
    let foreground_components = count_foreground(&cleaned);

    // 5. Soften mask edges ahead of tracing.
    let softened = gaussian(&cleaned, config.mask_blur_sigma);

    // 6. Largest outer boundary, compressed.
    let points = largest_by_area(outer_contours(&softened)).unwrap_or_default();
    let points = compress_collinear(&points);

    // 7. Back to original coordinates.
    ContourExtraction {
        points: rescale_points(&points, factor),
        foreground_components,
    }
}
