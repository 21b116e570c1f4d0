//! Connected-component counting on single-channel masks.
//!
//! Diagnostic companion to the extractors: reports how fragmented a
//! working mask is. Uses an explicit stack rather than recursion so a
//! pathological mask (every pixel foreground, one serpentine region)
//! cannot exhaust the call stack.

use image::GrayImage;

/// Offsets of the 8 neighbours of a pixel.
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count maximal 8-connected regions whose pixels equal `target`.
///
/// Row-major scan; each unvisited matching pixel seeds an iterative
/// flood fill and bumps the count. Diagonal contact joins regions, so
/// a one-pixel diagonal chain counts as a single component. A mask
/// with no matching pixels has zero components; a uniform matching
/// mask has exactly one. Total cost is O(pixels).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn count_components(mask: &GrayImage, target: u8) -> usize {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return 0;
    }

    let mut visited = vec![false; width as usize * height as usize];
    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;

    let mut components = 0;
    let mut stack: Vec<(u32, u32)> = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y).0[0] != target || visited[index(x, y)] {
                continue;
            }

            components += 1;
            visited[index(x, y)] = true;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                for (dx, dy) in NEIGHBOUR_OFFSETS {
                    let nx = i64::from(cx) + dx;
                    let ny = i64::from(cy) + dy;
                    if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    if mask.get_pixel(nx, ny).0[0] == target && !visited[index(nx, ny)] {
                        visited[index(nx, ny)] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    components
}

/// Count 8-connected regions of fully-set (255) pixels.
///
/// Convenience form for the binary masks the extractors build.
#[must_use]
pub fn count_foreground(mask: &GrayImage) -> usize {
    count_components(mask, 255)
}
