//! Photo-source classification: phone camera or something else.
//!
//! Phone photos get the color segmentation extractor; everything else
//! gets the gradient extractor. The decision is a fixed ladder of
//! heuristics, first match wins, and a wrong answer is tolerable — both
//! extractors degrade to fewer or no points, never a crash.

use crate::hsv::mean_saturation;
use crate::types::{RgbImage, SourceContext};

/// Maker/model substrings that identify phone cameras.
///
/// Matched case-insensitively against the joined make+model string.
/// `sm-` and `gt-` are Samsung model-code prefixes that appear without
/// the brand name in some firmware.
const PHONE_MAKER_TOKENS: [&str; 10] = [
    "iphone", "samsung", "pixel", "huawei", "xiaomi", "oneplus", "oppo", "vivo", "sm-", "gt-",
];

/// Native focal length range typical of phone camera modules, in mm.
const PHONE_FOCAL_RANGE_MM: std::ops::RangeInclusive<f64> = 1.0..=10.0;

/// File extensions phone cameras write.
const PHONE_FILE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "heic"];

/// Minimum pixel count for the image-heuristics step.
const PHONE_MIN_PIXELS: u64 = 1_000_000;

/// Aspect ratio range (long side over short side) typical of phone
/// sensors.
const PHONE_ASPECT_RANGE: std::ops::RangeInclusive<f64> = 1.2..=2.0;

/// Minimum mean HSV saturation (0-255 scale) for the image-heuristics
/// step. Phone processing pipelines boost saturation noticeably.
const PHONE_MIN_MEAN_SATURATION: f64 = 80.0;

/// What kind of device produced the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoSource {
    /// A phone camera; strong color processing is assumed.
    PhoneCamera,
    /// Anything else: dedicated cameras, renders, scans, screenshots.
    Other,
}

/// Which rung of the heuristic ladder decided the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evidence {
    /// A phone-manufacturer token appeared in make/model metadata.
    MakerToken,
    /// The focal length fell in the phone-module range.
    FocalLength,
    /// The capture carried GPS tags.
    GpsTag,
    /// Extension, resolution, aspect ratio, and saturation all matched.
    ImageHeuristics,
    /// Nothing matched; the default applied.
    NoSignal,
}

/// A classification decision with its supporting evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    /// The decided source kind.
    pub source: PhotoSource,
    /// Which heuristic made the call.
    pub evidence: Evidence,
}

/// Classify the source of a photo.
///
/// Metadata rungs run first; a missing or unreadable metadata bag
/// simply skips them. The image-heuristics rung needs every one of its
/// conditions to hold, and anything left over is [`PhotoSource::Other`].
#[must_use]
pub fn classify(context: &SourceContext, image: &RgbImage) -> Classification {
    if let Some(metadata) = &context.metadata {
        let maker = metadata.maker_string();
        if PHONE_MAKER_TOKENS.iter().any(|t| maker.contains(t)) {
            return Classification {
                source: PhotoSource::PhoneCamera,
                evidence: Evidence::MakerToken,
            };
        }

        if metadata
            .focal_length_mm()
            .is_some_and(|mm| PHONE_FOCAL_RANGE_MM.contains(&mm))
        {
            return Classification {
                source: PhotoSource::PhoneCamera,
                evidence: Evidence::FocalLength,
            };
        }

        if metadata.has_gps {
            return Classification {
                source: PhotoSource::PhoneCamera,
                evidence: Evidence::GpsTag,
            };
        }
    }

    if image_heuristics_match(context.file_name.as_deref(), image) {
        return Classification {
            source: PhotoSource::PhoneCamera,
            evidence: Evidence::ImageHeuristics,
        };
    }

    Classification {
        source: PhotoSource::Other,
        evidence: Evidence::NoSignal,
    }
}

/// The metadata-free fallback: extension, size, shape, and color
/// processing all have to look like a phone photo at once.
fn image_heuristics_match(file_name: Option<&str>, image: &RgbImage) -> bool {
    let Some(extension) = file_name.and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext))
    else {
        return false;
    };
    let extension = extension.to_lowercase();
    if !PHONE_FILE_EXTENSIONS.contains(&extension.as_str()) {
        return false;
    }

    let (w, h) = image.dimensions();
    let pixels = u64::from(w) * u64::from(h);
    if pixels <= PHONE_MIN_PIXELS {
        return false;
    }

    let long = f64::from(w.max(h));
    let short = f64::from(w.min(h));
    if short == 0.0 || !PHONE_ASPECT_RANGE.contains(&(long / short)) {
        return false;
    }

    mean_saturation(image) > PHONE_MIN_MEAN_SATURATION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CaptureMetadata, FocalLength};

    fn tiny_gray_image() -> RgbImage {
        RgbImage::from_pixel(10, 10, image::Rgb([100, 100, 100]))
    }

    fn context_with(metadata: CaptureMetadata) -> SourceContext {
        SourceContext {
            file_name: Some("photo.png".to_string()),
            metadata: Some(metadata),
        }
    }

    #[test]
    fn iphone_make_is_phone_by_maker_token() {
        let ctx = context_with(CaptureMetadata {
            make: Some("Apple".to_string()),
            model: Some("iPhone 13".to_string()),
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.source, PhotoSource::PhoneCamera);
        assert_eq!(decision.evidence, Evidence::MakerToken);
    }

    #[test]
    fn samsung_model_code_without_brand_matches() {
        let ctx = context_with(CaptureMetadata {
            model: Some("SM-G991B".to_string()),
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.evidence, Evidence::MakerToken);
    }

    #[test]
    fn maker_match_is_case_insensitive() {
        let ctx = context_with(CaptureMetadata {
            make: Some("XIAOMI".to_string()),
            ..CaptureMetadata::default()
        });
        assert_eq!(
            classify(&ctx, &tiny_gray_image()).source,
            PhotoSource::PhoneCamera,
        );
    }

    #[test]
    fn short_focal_length_is_phone() {
        let ctx = context_with(CaptureMetadata {
            make: Some("Unknown".to_string()),
            focal_length: Some(FocalLength::Rational {
                numerator: 17,
                denominator: 4,
            }),
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.source, PhotoSource::PhoneCamera);
        assert_eq!(decision.evidence, Evidence::FocalLength);
    }

    #[test]
    fn long_focal_length_is_not_phone_evidence() {
        let ctx = context_with(CaptureMetadata {
            focal_length: Some(FocalLength::Millimeters(50.0)),
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.source, PhotoSource::Other);
    }

    #[test]
    fn corrupt_focal_length_falls_through() {
        let ctx = context_with(CaptureMetadata {
            focal_length: Some(FocalLength::Rational {
                numerator: 42,
                denominator: 0,
            }),
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.source, PhotoSource::Other);
        assert_eq!(decision.evidence, Evidence::NoSignal);
    }

    #[test]
    fn gps_tag_is_phone() {
        let ctx = context_with(CaptureMetadata {
            has_gps: true,
            ..CaptureMetadata::default()
        });
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.evidence, Evidence::GpsTag);
    }

    #[test]
    fn maker_token_outranks_gps() {
        let ctx = context_with(CaptureMetadata {
            model: Some("Pixel 7".to_string()),
            has_gps: true,
            ..CaptureMetadata::default()
        });
        assert_eq!(
            classify(&ctx, &tiny_gray_image()).evidence,
            Evidence::MakerToken,
        );
    }

    #[test]
    fn no_metadata_and_no_heuristic_match_is_other() {
        let ctx = SourceContext::default();
        let decision = classify(&ctx, &tiny_gray_image());
        assert_eq!(decision.source, PhotoSource::Other);
        assert_eq!(decision.evidence, Evidence::NoSignal);
    }

    #[test]
    fn saturated_large_jpeg_matches_image_heuristics() {
        // 1500x1000: >1M pixels, aspect 1.5, fully saturated red.
        let image = RgbImage::from_pixel(1500, 1000, image::Rgb([255, 0, 0]));
        let ctx = SourceContext {
            file_name: Some("IMG_2041.JPG".to_string()),
            metadata: None,
        };
        let decision = classify(&ctx, &image);
        assert_eq!(decision.source, PhotoSource::PhoneCamera);
        assert_eq!(decision.evidence, Evidence::ImageHeuristics);
    }

    #[test]
    fn wrong_extension_fails_image_heuristics() {
        let image = RgbImage::from_pixel(1500, 1000, image::Rgb([255, 0, 0]));
        let ctx = SourceContext {
            file_name: Some("render.png".to_string()),
            metadata: None,
        };
        assert_eq!(classify(&ctx, &image).source, PhotoSource::Other);
    }

    #[test]
    fn small_image_fails_image_heuristics() {
        let image = RgbImage::from_pixel(800, 600, image::Rgb([255, 0, 0]));
        let ctx = SourceContext {
            file_name: Some("photo.jpg".to_string()),
            metadata: None,
        };
        assert_eq!(classify(&ctx, &image).source, PhotoSource::Other);
    }

    #[test]
    fn square_image_fails_image_heuristics() {
        let image = RgbImage::from_pixel(1100, 1100, image::Rgb([255, 0, 0]));
        let ctx = SourceContext {
            file_name: Some("photo.jpg".to_string()),
            metadata: None,
        };
        assert_eq!(classify(&ctx, &image).source, PhotoSource::Other);
    }

    #[test]
    fn desaturated_image_fails_image_heuristics() {
        let image = RgbImage::from_pixel(1500, 1000, image::Rgb([120, 120, 120]));
        let ctx = SourceContext {
            file_name: Some("photo.jpeg".to_string()),
            metadata: None,
        };
        assert_eq!(classify(&ctx, &image).source, PhotoSource::Other);
    }

    #[test]
    fn metadata_without_signal_still_reaches_image_heuristics() {
        let image = RgbImage::from_pixel(1500, 1000, image::Rgb([255, 0, 0]));
        let ctx = SourceContext {
            file_name: Some("photo.jpg".to_string()),
            metadata: Some(CaptureMetadata {
                make: Some("Canon".to_string()),
                model: Some("EOS R5".to_string()),
                focal_length: Some(FocalLength::Millimeters(85.0)),
                ..CaptureMetadata::default()
            }),
        };
        assert_eq!(classify(&ctx, &image).evidence, Evidence::ImageHeuristics);
    }
}
