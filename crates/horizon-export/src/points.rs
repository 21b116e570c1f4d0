//! Points-file serializer and parser.
//!
//! The exchange format is one point per line, `X Y`, space-separated
//! decimal integers in original-image pixel coordinates, ordered as
//! extracted. No header, no trailing metadata; an empty extraction is
//! an empty file. Downstream consumers index into this file, so the
//! serializer is byte-exact and the parser rejects anything it would
//! not itself have produced.

use std::fmt::Write;

use horizon_pipeline::Point;

/// Errors from parsing a points file.
#[derive(Debug, thiserror::Error)]
pub enum PointsParseError {
    /// A line was not two space-separated unsigned integers.
    #[error("malformed point on line {line}: {content:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line text.
        content: String,
    },
}

/// Serialize points into the text exchange format.
///
/// Each point becomes one `X Y` line terminated by `\n`. Empty input
/// yields the empty string.
#[must_use]
pub fn to_points_text(points: &[Point]) -> String {
    let mut out = String::new();
    for p in points {
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
    out
}

/// Parse a points file back into a point list.
///
/// Blank lines are ignored so a trailing newline (or none) round-trips
/// cleanly.
///
/// # Errors
///
/// Returns [`PointsParseError::Malformed`] for any non-blank line that
/// is not exactly two space-separated unsigned integers.
pub fn parse_points_text(text: &str) -> Result<Vec<Point>, PointsParseError> {
    let mut points = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let malformed = || PointsParseError::Malformed {
            line: index + 1,
            content: line.to_string(),
        };

        let mut fields = trimmed.split_whitespace();
        let x = fields
            .next()
            .and_then(|f| f.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        let y = fields
            .next()
            .and_then(|f| f.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        if fields.next().is_some() {
            return Err(malformed());
        }

        points.push(Point::new(x, y));
    }
    Ok(points)
}
