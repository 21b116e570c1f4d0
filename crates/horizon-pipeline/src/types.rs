//! Shared types for the horizon extraction pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::Classification;
use crate::metadata::CaptureMetadata;

/// Re-export `GrayImage` so downstream crates can reference
/// single-channel raster data without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbImage` so downstream crates can reference the
/// original decoded image without depending on `image` directly.
pub use image::RgbImage;

/// An integer pixel coordinate in original-image space.
///
/// Extractors work at a reduced resolution internally; every point they
/// return has already been mapped back to the original image grid and
/// rounded to the nearest pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: u32,
    /// Vertical position (pixels from top edge).
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Which contour extraction algorithm produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Luminance-gradient edge map on the red channel (generic images).
    Gradient,
    /// Hue-band segmentation in HSV space (phone-camera photos).
    Color,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient => f.write_str("gradient"),
            Self::Color => f.write_str("color"),
        }
    }
}

/// Facts about where an image came from, supplied by the caller.
///
/// The pipeline itself never touches the filesystem; the file name (for
/// its extension) and any capture metadata arrive through this struct.
/// Both are optional — a missing value simply weakens classification.
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    /// Original file name, used only for its extension.
    pub file_name: Option<String>,
    /// Capture metadata from an external EXIF-reading collaborator.
    pub metadata: Option<CaptureMetadata>,
}

/// Configuration for the extraction pipeline.
///
/// All parameters default to the values the algorithms were tuned with;
/// they are exposed so callers (and tests) can vary them without
/// touching algorithm logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum working dimension. Images whose longer side exceeds this
    /// are downscaled before extraction and the resulting points are
    /// mapped back to the original grid. Caps the cost of the contour
    /// search without changing which object is chosen.
    pub max_dimension: u32,

    /// Gaussian blur sigma applied before gradient edge detection.
    pub blur_sigma: f32,

    /// Hysteresis low threshold for the gradient edge map. Pixels with
    /// gradient magnitude between `canny_low` and `canny_high` are
    /// edges only if 8-connected to a strong edge.
    pub canny_low: f32,

    /// Hysteresis high threshold. Pixels above this value are definite
    /// edges.
    pub canny_high: f32,

    /// Sigma of the light blur that softens the color-segmentation mask
    /// before contour tracing.
    pub mask_blur_sigma: f32,

    /// Radius of the square structuring element used for the
    /// closing/opening cleanup of the color mask (2 gives 5x5).
    pub morph_radius: u8,
}

impl PipelineConfig {
    /// Default maximum working dimension in pixels.
    pub const DEFAULT_MAX_DIMENSION: u32 = 1000;
    /// Default Gaussian blur sigma for the gradient extractor.
    pub const DEFAULT_BLUR_SIGMA: f32 = 1.4;
    /// Default hysteresis low threshold.
    pub const DEFAULT_CANNY_LOW: f32 = 50.0;
    /// Default hysteresis high threshold.
    pub const DEFAULT_CANNY_HIGH: f32 = 150.0;
    /// Default mask-softening sigma (the sigma of a 3x3 kernel).
    pub const DEFAULT_MASK_BLUR_SIGMA: f32 = 0.8;
    /// Default morphological structuring element radius.
    pub const DEFAULT_MORPH_RADIUS: u8 = 2;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dimension: Self::DEFAULT_MAX_DIMENSION,
            blur_sigma: Self::DEFAULT_BLUR_SIGMA,
            canny_low: Self::DEFAULT_CANNY_LOW,
            canny_high: Self::DEFAULT_CANNY_HIGH,
            mask_blur_sigma: Self::DEFAULT_MASK_BLUR_SIGMA,
            morph_radius: Self::DEFAULT_MORPH_RADIUS,
        }
    }
}

/// Output of a single contour extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContourExtraction {
    /// Ordered boundary points in original-image coordinates. Empty
    /// when no contour was found — that is a valid outcome, not an
    /// error.
    pub points: Vec<Point>,
    /// Number of 8-connected foreground regions in the working mask.
    /// Diagnostic only; plays no part in contour selection.
    pub foreground_components: usize,
}

/// Result of one full pipeline run.
///
/// Owns the decoded source image so a downstream renderer can overlay
/// the point set without re-decoding.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The extracted boundary, rescaled to original coordinates.
    pub points: Vec<Point>,
    /// The decoded source image.
    pub original: RgbImage,
    /// Source image dimensions in pixels.
    pub dimensions: Dimensions,
    /// Which extractor ran.
    pub algorithm: Algorithm,
    /// The classification decision that selected the extractor.
    pub classification: Classification,
    /// Foreground region count from the extractor's working mask.
    pub foreground_components: usize,
}

/// Structured result handed to external callers.
///
/// Every pipeline failure is folded into this shape — `success: false`
/// plus a human-readable message — so no error escapes the boundary as
/// a panic or an unhandled `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Whether extraction completed. Zero points still counts as
    /// success.
    pub success: bool,
    /// Human-readable failure message, `None` on success.
    pub error: Option<String>,
    /// Number of extracted boundary points.
    pub edge_points_count: usize,
    /// Where the point file was persisted, when the caller wrote one.
    pub edge_points_file: Option<String>,
    /// Original image width in pixels (0 on failure).
    pub width: u32,
    /// Original image height in pixels (0 on failure).
    pub height: u32,
    /// Which extractor ran, `None` on failure.
    pub algorithm: Option<Algorithm>,
}

impl ExtractionReport {
    /// Build a success report from an [`Extraction`].
    ///
    /// `edge_points_file` starts as `None`; the caller fills it in
    /// after persisting the point set.
    #[must_use]
    pub fn from_extraction(extraction: &Extraction) -> Self {
        Self {
            success: true,
            error: None,
            edge_points_count: extraction.points.len(),
            edge_points_file: None,
            width: extraction.dimensions.width,
            height: extraction.dimensions.height,
            algorithm: Some(extraction.algorithm),
        }
    }

    /// Build a failure report carrying only the error message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            edge_points_count: 0,
            edge_points_file: None,
            width: 0,
            height: 0,
            algorithm: None,
        }
    }
}

/// Errors that can occur inside the pipeline.
///
/// Deliberately small: metadata problems and empty masks are absorbed
/// where they occur and never surface here. Only conditions that
/// prevent producing any result at all become errors.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,
}
