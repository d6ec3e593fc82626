//! Transparency filters.
//!
//! Both filters mutate a [`PixelBuffer`](crate::buffer::PixelBuffer) in place
//! and only ever write fully transparent black; every other pixel is left
//! exactly as it was.
//!
//! | Filter | Selects | Erases |
//! |--------|---------|--------|
//! | `high_pass` | R, G, B all >= threshold | every selected pixel |
//! | `flood_fill` | color within tolerance of the seed | the region connected to the seed |
//!
//! Each pass is single-threaded and runs to completion. Independent images can
//! be filtered in parallel since every pass owns its buffer.

pub mod flood_fill;
pub mod high_pass;

pub use flood_fill::{flood_fill, FloodFillResult, ToleranceBand};
pub use high_pass::high_pass;
