use translucify::{PixelBuffer, Rgba};

pub const WHITE: Rgba = [255, 255, 255, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];

/// `background` everywhere, `foreground` in the rectangle [x0, x1) x [y0, y1).
pub fn framed(
    width: usize,
    height: usize,
    background: Rgba,
    foreground: Rgba,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
) -> PixelBuffer {
    let mut buffer = PixelBuffer::filled(width, height, background);
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.set(x, y, foreground);
        }
    }
    buffer
}

/// Deterministic pseudo-random opaque image with few distinct colors, so that
/// equal-color regions of varied shapes appear.
pub fn patchwork(width: usize, height: usize, seed: u32) -> PixelBuffer {
    const PALETTE: [Rgba; 3] = [[200, 200, 200, 255], [40, 90, 160, 255], [250, 250, 250, 255]];
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let mut buffer = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            buffer.set(x, y, PALETTE[(state % 3) as usize]);
        }
    }
    buffer
}

/// Pixels connected to the seed through pixels equal to the seed color.
///
/// With `anti_diagonal` the right-up / left-down diagonal also connects,
/// which is the most the flood fill may ever reach.
pub fn reference_region(
    buffer: &PixelBuffer,
    seed_x: usize,
    seed_y: usize,
    anti_diagonal: bool,
) -> Vec<bool> {
    let (width, height) = (buffer.width(), buffer.height());
    let target = buffer.get(seed_x, seed_y);
    let mut region = vec![false; width * height];
    let mut stack = vec![(seed_x, seed_y)];
    region[seed_y * width + seed_x] = true;

    while let Some((x, y)) = stack.pop() {
        let mut neighbors = Vec::with_capacity(6);
        if x > 0 {
            neighbors.push((x - 1, y));
        }
        if x + 1 < width {
            neighbors.push((x + 1, y));
        }
        if y > 0 {
            neighbors.push((x, y - 1));
        }
        if y + 1 < height {
            neighbors.push((x, y + 1));
        }
        if anti_diagonal {
            if x + 1 < width && y > 0 {
                neighbors.push((x + 1, y - 1));
            }
            if x > 0 && y + 1 < height {
                neighbors.push((x - 1, y + 1));
            }
        }
        for (nx, ny) in neighbors {
            let idx = ny * width + nx;
            if !region[idx] && buffer.get(nx, ny) == target {
                region[idx] = true;
                stack.push((nx, ny));
            }
        }
    }
    region
}
