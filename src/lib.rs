//! Translucify
//!
//! Makes image backgrounds transparent. Two filters are available:
//! - **High-pass**: erases every pixel whose R, G and B all reach a brightness
//!   threshold (white paper, bright studio backdrops).
//! - **Flood fill**: erases the region connected to a seed pixel (the top-left
//!   corner by default) whose colors lie within a relative tolerance of the
//!   seed color.
//!
//! Edits are binary: a pixel is either left untouched or becomes fully
//! transparent black `(0, 0, 0, 0)`.
//!
//! ## Image Format
//! Buffers are RGBA u8, shape (height, width, 4), row-major. The same layout
//! is used by canvas `ImageData`, numpy arrays and `image::RgbaImage`.
//!
//! ## Architecture
//! - [`buffer`] - the pixel buffer
//! - [`filters`] - high-pass and flood-fill passes over a buffer
//! - [`pipeline`] - acquire pixels from a [`PixelSource`], filter, return the buffer
//! - [`apply`] - the public entry points over one image or a collection,
//!   handing results to a [`Presenter`]
//! - [`io`] - image files as sources, PNG directories as presenters
//!
//! Python bindings (feature `python`) and WASM bindings (feature `wasm`) wrap
//! the same filters.

pub mod apply;
pub mod buffer;
pub mod config;
pub mod error;
pub mod filters;
pub mod io;
pub mod pipeline;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use apply::{apply_flood_fill, apply_high_pass, ApplyReport, ImageSelection};
pub use buffer::{PixelBuffer, Rgba, TRANSPARENT};
pub use config::{FilterOptions, FilterParameters};
pub use error::{Result, TranslucifyError};
pub use pipeline::{run, transform, FilterKind, PixelSource, Presenter};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyReadonlyArray3};
    use pyo3::exceptions::{PyIOError, PyIndexError, PyTypeError, PyValueError};
    use pyo3::prelude::*;
    use pyo3::types::PyList;
    use rayon::prelude::*;

    use crate::buffer::PixelBuffer;
    use crate::config::{FilterOptions, FilterParameters};
    use crate::error::TranslucifyError;
    use crate::pipeline::{transform, FilterKind};

    impl From<TranslucifyError> for PyErr {
        fn from(err: TranslucifyError) -> PyErr {
            let message = err.to_string();
            match err {
                TranslucifyError::InvalidBounds { .. } => PyIndexError::new_err(message),
                TranslucifyError::UnsupportedInputKind(_) => PyTypeError::new_err(message),
                TranslucifyError::InvalidDimensions { .. } | TranslucifyError::Config(_) => {
                    PyValueError::new_err(message)
                }
                TranslucifyError::SourceUnavailable { .. }
                | TranslucifyError::PresentationFailed { .. } => PyIOError::new_err(message),
            }
        }
    }

    /// Images passed from Python, resolved once per call.
    enum PyImages {
        Single(PixelBuffer),
        Many(Vec<PixelBuffer>),
    }

    fn unsupported(obj: &Bound<'_, PyAny>) -> PyErr {
        let type_name = obj
            .get_type()
            .name()
            .map(|name| name.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        TranslucifyError::UnsupportedInputKind(format!(
            "expected a (H, W, 4) uint8 array or an iterable of them, got {type_name}"
        ))
        .into()
    }

    fn to_buffer(array: PyReadonlyArray3<'_, u8>) -> PyResult<PixelBuffer> {
        Ok(PixelBuffer::from_array(array.as_array().to_owned())?)
    }

    fn resolve<'py>(images: &Bound<'py, PyAny>) -> PyResult<PyImages> {
        if let Ok(array) = images.extract::<PyReadonlyArray3<'py, u8>>() {
            return Ok(PyImages::Single(to_buffer(array)?));
        }

        let iter = images.try_iter().map_err(|_| unsupported(images))?;
        let mut buffers = Vec::new();
        for item in iter {
            let item = item?;
            let array = item
                .extract::<PyReadonlyArray3<'py, u8>>()
                .map_err(|_| unsupported(&item))?;
            buffers.push(to_buffer(array)?);
        }
        Ok(PyImages::Many(buffers))
    }

    fn process(
        py: Python<'_>,
        images: PyImages,
        kind: FilterKind,
        params: FilterParameters,
    ) -> PyResult<PyObject> {
        match images {
            PyImages::Single(buffer) => {
                let result = py.allow_threads(|| transform(buffer, kind, &params))?;
                Ok(result.into_array().into_pyarray(py).into_any().unbind())
            }
            PyImages::Many(buffers) => {
                let results = py.allow_threads(|| {
                    buffers
                        .into_par_iter()
                        .map(|buffer| transform(buffer, kind, &params))
                        .collect::<Result<Vec<_>, _>>()
                })?;
                let arrays = results
                    .into_iter()
                    .map(|buffer| buffer.into_array().into_pyarray(py));
                Ok(PyList::new(py, arrays)?.into_any().unbind())
            }
        }
    }

    /// Make bright pixels transparent.
    ///
    /// `images` is one (H, W, 4) uint8 array or any iterable of them. Returns
    /// an array or a list of arrays respectively. An invalid
    /// `threshold_value` (NaN, outside 0-255) is ignored.
    #[pyfunction]
    #[pyo3(signature = (images, threshold_value=None))]
    pub fn apply_high_pass(
        py: Python<'_>,
        images: &Bound<'_, PyAny>,
        threshold_value: Option<f64>,
    ) -> PyResult<PyObject> {
        let mut params = FilterParameters::default();
        params.apply_options(&FilterOptions {
            threshold_value,
            tolerance_fraction: None,
        });
        let images = resolve(images)?;
        process(py, images, FilterKind::HighPass, params)
    }

    /// Remove the background connected to the seed pixel (top-left by default).
    ///
    /// An invalid `tolerance_fraction` (NaN, outside 0.0-1.0) is ignored.
    /// Raises IndexError if the seed is outside an image.
    #[pyfunction]
    #[pyo3(signature = (images, tolerance_fraction=None, seed_x=0, seed_y=0))]
    pub fn apply_flood_fill(
        py: Python<'_>,
        images: &Bound<'_, PyAny>,
        tolerance_fraction: Option<f64>,
        seed_x: usize,
        seed_y: usize,
    ) -> PyResult<PyObject> {
        let mut params = FilterParameters::default();
        params.apply_options(&FilterOptions {
            threshold_value: None,
            tolerance_fraction,
        });
        let images = resolve(images)?;
        process(py, images, FilterKind::FloodFill { seed_x, seed_y }, params)
    }

    /// Translucify Rust extension module
    #[pymodule]
    pub fn translucify(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(apply_high_pass, m)?)?;
        m.add_function(wrap_pyfunction!(apply_flood_fill, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::translucify;
