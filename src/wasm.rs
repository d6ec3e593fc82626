//! WebAssembly exports for the transparency filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. They take the
//! flat RGBA bytes of a canvas `ImageData` and return the filtered bytes, ready
//! for `putImageData` on the canvas that replaces the original `<img>`.
//!
//! Parameters arrive as JS numbers. NaN or out-of-range values fall back to
//! the defaults, matching the configuration rules of the native API.

use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::config::FilterParameters;
use crate::error::TranslucifyError;
use crate::pipeline::{transform, FilterKind};

fn to_js(err: TranslucifyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// High-pass
// ============================================================================

/// Make bright pixels transparent.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `threshold_value` - Pixels with R, G and B all >= this become transparent (0-255)
///
/// # Returns
/// Flat array of RGBA bytes
#[wasm_bindgen]
pub fn high_pass_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    threshold_value: f64,
) -> Result<Vec<u8>, JsValue> {
    let buffer = PixelBuffer::from_raw(width, height, data.to_vec()).map_err(to_js)?;

    let mut params = FilterParameters::default();
    params.set_threshold_value(threshold_value);

    let result = transform(buffer, FilterKind::HighPass, &params).map_err(to_js)?;
    Ok(result.into_raw())
}

// ============================================================================
// Flood fill
// ============================================================================

/// Remove the background region connected to the seed pixel.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `seed_x` - Seed X coordinate (0 for the top-left corner)
/// * `seed_y` - Seed Y coordinate
/// * `tolerance_fraction` - Relative per-channel color tolerance (0.0-1.0)
///
/// # Returns
/// Flat array of RGBA bytes, or an error string if the seed is outside the image
#[wasm_bindgen]
pub fn flood_fill_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    seed_x: usize,
    seed_y: usize,
    tolerance_fraction: f64,
) -> Result<Vec<u8>, JsValue> {
    let buffer = PixelBuffer::from_raw(width, height, data.to_vec()).map_err(to_js)?;

    let mut params = FilterParameters::default();
    params.set_tolerance_fraction(tolerance_fraction);

    let kind = FilterKind::FloodFill { seed_x, seed_y };
    let result = transform(buffer, kind, &params).map_err(to_js)?;
    Ok(result.into_raw())
}
