//! Capture metadata supplied by an external EXIF-reading collaborator.
//!
//! The pipeline never parses EXIF itself. Whatever the collaborator
//! managed to read arrives as a [`CaptureMetadata`] bag; any field may
//! be missing and a malformed value (such as a rational with a zero
//! denominator) simply normalizes to "no value". Nothing in this module
//! can fail loudly.

use serde::{Deserialize, Serialize};

/// A focal length as reported by capture metadata.
///
/// EXIF stores focal lengths either as a plain number or as an unsigned
/// rational; both forms are preserved so normalization can guard the
/// division itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FocalLength {
    /// Already-normalized value in millimeters.
    Millimeters(f64),
    /// An EXIF-style unsigned rational.
    Rational {
        /// Rational numerator.
        numerator: u32,
        /// Rational denominator. May be zero in corrupt metadata.
        denominator: u32,
    },
}

impl FocalLength {
    /// Normalize to a float in millimeters.
    ///
    /// Returns `None` for a zero denominator or a non-finite value —
    /// corrupt metadata degrades to "no value" rather than an error.
    #[must_use]
    pub fn as_millimeters(self) -> Option<f64> {
        match self {
            Self::Millimeters(mm) => mm.is_finite().then_some(mm),
            Self::Rational {
                numerator,
                denominator,
            } => {
                if denominator == 0 {
                    return None;
                }
                Some(f64::from(numerator) / f64::from(denominator))
            }
        }
    }
}

/// Optional capture metadata for one image.
///
/// `Default` gives the fully-absent bag, equivalent to an image with no
/// readable metadata at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Camera manufacturer (EXIF `Make`).
    pub make: Option<String>,
    /// Camera model (EXIF `Model`).
    pub model: Option<String>,
    /// Native focal length (EXIF `FocalLength`).
    pub focal_length: Option<FocalLength>,
    /// 35mm-equivalent focal length (EXIF `FocalLengthIn35mmFilm`),
    /// consulted only when the native field is absent or corrupt.
    pub focal_length_35mm: Option<FocalLength>,
    /// Whether the capture carries any GPS tags.
    pub has_gps: bool,
}

impl CaptureMetadata {
    /// Best-effort focal length in millimeters.
    ///
    /// Extraction strategies run in a fixed order — the native focal
    /// length field first, then the 35mm-equivalent field — and the
    /// first value that normalizes to a finite float wins.
    #[must_use]
    pub fn focal_length_mm(&self) -> Option<f64> {
        [self.focal_length, self.focal_length_35mm]
            .into_iter()
            .flatten()
            .find_map(FocalLength::as_millimeters)
    }

    /// Make and model joined for token matching, lowercased.
    ///
    /// Missing fields contribute nothing; two absent fields yield an
    /// empty string which matches no token.
    #[must_use]
    pub fn maker_string(&self) -> String {
        let make = self.make.as_deref().unwrap_or("");
        let model = self.model.as_deref().unwrap_or("");
        format!("{make} {model}").to_lowercase()
    }
}
