//! Image transform pipeline: acquire pixels, run one filter, hand back the buffer.

use log::debug;

use crate::buffer::PixelBuffer;
use crate::config::FilterParameters;
use crate::error::Result;
use crate::filters::{flood_fill, high_pass};

/// Which filter a pipeline run applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterKind {
    /// Erase bright pixels (`FilterParameters::threshold_value`).
    HighPass,
    /// Erase the region connected to the seed
    /// (`FilterParameters::tolerance_fraction`).
    FloodFill { seed_x: usize, seed_y: usize },
}

impl FilterKind {
    /// Flood fill seeded at the top-left corner, where the background usually is.
    pub fn flood_fill_from_corner() -> Self {
        FilterKind::FloodFill {
            seed_x: 0,
            seed_y: 0,
        }
    }
}

/// Supplies decoded RGBA pixels for one source image.
///
/// Implementations decide how the pixels are obtained (file decode, host
/// array, cache). `acquire` is called once per pipeline run and must return a
/// fresh buffer the pipeline can own.
pub trait PixelSource {
    /// Identifier used in logs, reports and by presenters.
    fn id(&self) -> &str;

    fn acquire(&self) -> Result<PixelBuffer>;
}

/// Takes a transformed buffer in place of the original image `id`.
pub trait Presenter {
    fn present(&mut self, id: &str, buffer: PixelBuffer) -> Result<()>;
}

/// Run the selected filter over an already decoded buffer.
pub fn transform(
    mut buffer: PixelBuffer,
    kind: FilterKind,
    params: &FilterParameters,
) -> Result<PixelBuffer> {
    let (width, height) = (buffer.width(), buffer.height());

    match kind {
        FilterKind::HighPass => {
            let erased = high_pass(&mut buffer, params.threshold_value);
            debug!(
                "high-pass threshold={} on {width}x{height}: erased {erased} pixels",
                params.threshold_value
            );
        }
        FilterKind::FloodFill { seed_x, seed_y } => {
            let result = flood_fill(&mut buffer, seed_x, seed_y, params.tolerance_fraction)?;
            debug!(
                "flood-fill seed=({seed_x}, {seed_y}) tolerance={} on {width}x{height}: erased {} pixels, bounds {:?}",
                params.tolerance_fraction, result.erased, result.bounds
            );
        }
    }

    Ok(buffer)
}

/// Acquire pixels from `source` and transform them.
///
/// Errors from the source are returned as they are.
pub fn run<S>(source: &S, kind: FilterKind, params: &FilterParameters) -> Result<PixelBuffer>
where
    S: PixelSource + ?Sized,
{
    let buffer = source.acquire()?;
    debug!("acquired `{}`", source.id());
    transform(buffer, kind, params)
}
