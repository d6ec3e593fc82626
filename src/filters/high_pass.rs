//! High-pass brightness filter.
//!
//! Erases every pixel whose red, green and blue channels all reach the
//! threshold. Typical use is knocking out a white page background behind a
//! logo or scanned drawing.

use crate::buffer::PixelBuffer;

/// Erase bright pixels in place.
///
/// # Arguments
/// * `buffer` - RGBA buffer, mutated in place
/// * `threshold` - Threshold value (0-255). A pixel is erased when R, G and B are all >= threshold.
///
/// # Returns
/// Number of pixels erased
pub fn high_pass(buffer: &mut PixelBuffer, threshold: u8) -> usize {
    let (width, height) = (buffer.width(), buffer.height());
    let mut erased = 0;

    for y in 0..height {
        for x in 0..width {
            let [r, g, b, _] = buffer.get(x, y);
            if r >= threshold && g >= threshold && b >= threshold {
                buffer.erase(x, y);
                erased += 1;
            }
        }
    }
    erased
}
