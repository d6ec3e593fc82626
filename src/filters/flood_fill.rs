//! Background removal by tolerance flood fill.
//!
//! Erases the connected region of pixels whose color lies within a relative
//! tolerance of the seed pixel. The fill walks vertical runs: each popped
//! coordinate is extended up to the top of its run, then the run is erased top
//! to bottom while the left and right columns are checked for the start of
//! new runs. Only run starts are pushed, so the stack stays proportional to
//! the number of runs rather than the number of pixels.
//!
//! The right column also gets a right-up diagonal check so that narrow
//! diagonal channels of background are followed. There is no matching
//! left-up check.

use crate::buffer::{PixelBuffer, Rgba};
use crate::error::Result;

/// Inclusive per-channel color range around a seed color. Alpha is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToleranceBand {
    min: [f64; 3],
    max: [f64; 3],
}

impl ToleranceBand {
    /// Band of `seed * (1 - tolerance) ..= seed * (1 + tolerance)` per channel.
    pub fn new(seed: Rgba, tolerance: f32) -> Self {
        let mut min = [0.0; 3];
        let mut max = [0.0; 3];
        let tolerance = tolerance as f64;
        for c in 0..3 {
            let v = seed[c] as f64;
            min[c] = v * (1.0 - tolerance);
            max[c] = v * (1.0 + tolerance);
        }
        Self { min, max }
    }

    #[inline]
    pub fn matches(&self, color: Rgba) -> bool {
        (0..3).all(|c| {
            let v = color[c] as f64;
            v >= self.min[c] && v <= self.max[c]
        })
    }
}

/// Flood fill result with metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloodFillResult {
    /// Number of erased pixels
    pub erased: usize,
    /// Bounds of the erased region
    pub bounds: Option<(usize, usize, usize, usize)>, // (x, y, width, height)
}

/// Erase the background region connected to (`seed_x`, `seed_y`).
///
/// # Arguments
/// * `buffer` - RGBA buffer, mutated in place
/// * `seed_x` - Seed X coordinate
/// * `seed_y` - Seed Y coordinate
/// * `tolerance` - Relative color tolerance (0.0-1.0)
///
/// # Errors
/// `InvalidBounds` if the seed lies outside the buffer. The buffer is left
/// untouched in that case.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    seed_x: usize,
    seed_y: usize,
    tolerance: f32,
) -> Result<FloodFillResult> {
    buffer.check_bounds(seed_x, seed_y)?;

    let width = buffer.width();
    let height = buffer.height();
    let band = ToleranceBand::new(buffer.get(seed_x, seed_y), tolerance);

    // Pixels erased by this pass never match again, even when the band
    // contains transparent black (a black seed).
    let mut visited = vec![false; width * height];
    let matches = |buffer: &PixelBuffer, visited: &[bool], x: usize, y: usize| {
        !visited[y * width + x] && band.matches(buffer.get(x, y))
    };

    let mut erased = 0;
    let mut min_x = width;
    let mut min_y = height;
    let mut max_x = 0;
    let mut max_y = 0;

    let mut stack = vec![(seed_x, seed_y)];

    while let Some((x, mut y)) = stack.pop() {
        if !matches(buffer, &visited, x, y) {
            // Already consumed by an earlier run
            continue;
        }
        // Climb to the top of the run
        while y > 0 && matches(buffer, &visited, x, y - 1) {
            y -= 1;
        }

        let mut reach_left = false;
        let mut reach_right = false;

        while y < height && matches(buffer, &visited, x, y) {
            buffer.erase(x, y);
            visited[y * width + x] = true;
            erased += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            if x > 0 {
                if matches(buffer, &visited, x - 1, y) {
                    if !reach_left {
                        stack.push((x - 1, y));
                        reach_left = true;
                    }
                } else {
                    reach_left = false;
                }
            }

            if x + 1 < width {
                if matches(buffer, &visited, x + 1, y) {
                    if !reach_right {
                        stack.push((x + 1, y));
                        reach_right = true;
                    }
                } else if y > 0 && !reach_left && matches(buffer, &visited, x + 1, y - 1) {
                    stack.push((x + 1, y - 1));
                    reach_left = true;
                } else {
                    reach_right = false;
                }
            }

            y += 1;
        }
    }

    let bounds = if erased > 0 {
        Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    } else {
        None
    };

    Ok(FloodFillResult { erased, bounds })
}
