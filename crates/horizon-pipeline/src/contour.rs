//! Contour tracing and selection on binary masks.
//!
//! Border following via `imageproc::contours::find_contours` yields
//! every boundary in a mask along with its nesting; this module keeps
//! only the outermost ones, picks the largest by enclosed area, and
//! maps its points back to original-image coordinates.

use image::GrayImage;

use crate::types::Point;

/// Trace the outermost boundaries of a binary mask.
///
/// Interior boundaries (holes, and anything nested inside another
/// region) are discarded; a crater on the near side of a planet is part
/// of the silhouette's interior, not a rival boundary. Contours are
/// returned in discovery order.
#[must_use]
pub fn outer_contours(mask: &GrayImage) -> Vec<Vec<Point>> {
    let contours: Vec<imageproc::contours::Contour<u32>> =
        imageproc::contours::find_contours(mask);

    contours
        .into_iter()
        .filter(|c| c.parent.is_none())
        .map(|c| c.points.into_iter().map(|p| Point::new(p.x, p.y)).collect())
        .collect()
}

/// Signed shoelace sum doubled, in integer arithmetic.
///
/// Working coordinates are bounded by the scale normalizer, so the
/// products fit comfortably in `i64` and the area is exact.
fn shoelace_doubled(points: &[Point]) -> i64 {
    if points.len() < 3 {
        return 0;
    }

    let mut sum = 0_i64;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        let (ax, ay) = (i64::from(a.x), i64::from(a.y));
        let (bx, by) = (i64::from(b.x), i64::from(b.y));
        sum += ax * by - bx * ay;
    }
    sum
}

/// Enclosed area of a closed contour, in square working pixels.
///
/// Degenerate contours (fewer than 3 points) have zero area.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polygon_area(points: &[Point]) -> f64 {
    shoelace_doubled(points).unsigned_abs() as f64 / 2.0
}

/// Pick the contour with the largest enclosed area.
///
/// Ties keep the earlier contour, so the choice is deterministic for a
/// fixed input regardless of how many candidates share the maximum.
/// Returns `None` when `contours` is empty.
#[must_use]
pub fn largest_by_area(contours: Vec<Vec<Point>>) -> Option<Vec<Point>> {
    let mut best: Option<(f64, Vec<Point>)> = None;
    for contour in contours {
        let area = polygon_area(&contour);
        match &best {
            Some((best_area, _)) if area <= *best_area => {}
            _ => best = Some((area, contour)),
        }
    }
    best.map(|(_, contour)| contour)
}

/// Drop interior points of horizontal and vertical runs.
///
/// Border following emits every boundary pixel; long straight runs
/// along one axis carry no shape information beyond their endpoints.
/// Diagonal and curved stretches are left untouched.
#[must_use]
pub fn compress_collinear(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut kept = Vec::with_capacity(points.len());
    kept.push(points[0]);
    for window in points.windows(3) {
        let [prev, mid, next] = window else {
            continue;
        };
        let same_column = prev.x == mid.x && mid.x == next.x;
        let same_row = prev.y == mid.y && mid.y == next.y;
        if !(same_column || same_row) {
            kept.push(*mid);
        }
    }
    kept.push(points[points.len() - 1]);
    kept
}

/// Map working-resolution points back to the original image grid.
///
/// Each coordinate is multiplied by `factor` and rounded to the nearest
/// pixel. A factor of 1.0 is the identity.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rescale_points(points: &[Point], factor: f64) -> Vec<Point> {
    if (factor - 1.0).abs() < f64::EPSILON {
        return points.to_vec();
    }

    points
        .iter()
        .map(|p| {
            Point::new(
                (f64::from(p.x) * factor).round() as u32,
                (f64::from(p.y) * factor).round() as u32,
            )
        })
        .collect()
}
