//! horizon-pipeline: Pure contour extraction pipeline (sans-IO).
//!
//! Extracts the boundary of the dominant foreground object from a
//! photo: classify the photo source -> pick an extractor (gradient for
//! generic images, hue segmentation for phone photos) -> trace outer
//! boundaries -> keep the largest -> map back to original coordinates.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. Filesystem interaction and
//! the JSON reporting boundary live in the `horizon` binary.

pub mod classify;
pub mod color;
pub mod components;
pub mod contour;
pub mod filter;
pub mod gradient;
pub mod hsv;
pub mod metadata;
pub mod scale;
pub mod types;

pub use classify::{Classification, Evidence, PhotoSource, classify};
pub use metadata::{CaptureMetadata, FocalLength};
pub use types::{
    Algorithm, ContourExtraction, Dimensions, Extraction, ExtractionReport, PipelineConfig,
    PipelineError, Point, SourceContext,
};

/// Run the full extraction pipeline.
///
/// Takes raw image bytes (PNG, JPEG, BMP, WebP, TIFF) plus whatever
/// the caller knows about the image's origin, and produces an
/// [`Extraction`] carrying the boundary points in original-image
/// coordinates.
///
/// # Pipeline steps
///
/// 1. Decode to RGB
/// 2. Classify the photo source from metadata and image heuristics
/// 3. Extract: hue segmentation for phone photos, gradient otherwise
/// 4. Rescale boundary points to the original grid (inside the
///    extractor)
///
/// An image with no detectable boundary yields an empty point set, not
/// an error.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn process(
    image_bytes: &[u8],
    context: &SourceContext,
    config: &PipelineConfig,
) -> Result<Extraction, PipelineError> {
    // 1. Decode.
    if image_bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }
    let original = image::load_from_memory(image_bytes)?.to_rgb8();
    let dimensions = Dimensions {
        width: original.width(),
        height: original.height(),
    };

    // 2. Classify.
    let classification = classify(context, &original);

    // 3. Extract with the matching algorithm.
    let (algorithm, extraction) = match classification.source {
        PhotoSource::PhoneCamera => (
            Algorithm::Color,
            color::extract_color_contour(&original, config),
        ),
        PhotoSource::Other => {
            let intensity = gradient::red_channel(&original);
            (
                Algorithm::Gradient,
                gradient::extract_gradient_contour(&intensity, config),
            )
        }
    };

    Ok(Extraction {
        points: extraction.points,
        original,
        dimensions,
        algorithm,
        classification,
        foreground_components: extraction.foreground_components,
    })
}
