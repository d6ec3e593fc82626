//! RGBA pixel buffer.
//!
//! Storage is an ndarray of shape (height, width, 4) in standard (row-major)
//! layout, so pixel (x, y) channel c sits at `(y * width + x) * 4 + c` in the
//! raw byte vector. This matches the flat layout of canvas `ImageData`, numpy
//! `(H, W, 4)` arrays and `image::RgbaImage`.

use ndarray::{Array3, ArrayView3, Axis};

use crate::error::{Result, TranslucifyError};

/// One RGBA pixel, 8 bits per channel.
pub type Rgba = [u8; 4];

/// Fully transparent black, the value every erased pixel receives.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Mutable RGBA raster under transformation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: Array3::<u8>::zeros((height, width, 4)),
        }
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.set(x, y, color);
            }
        }
        buffer
    }

    /// Wrap flat RGBA bytes (length = width * height * 4).
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let len = data.len();
        let data = Array3::from_shape_vec((height, width, 4), data)
            .map_err(|_| TranslucifyError::InvalidDimensions { width, height, len })?;
        Ok(Self { data })
    }

    /// Wrap an owned (height, width, 4) array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != 4 {
            return Err(TranslucifyError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Ok(Self { data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Check a caller-supplied coordinate before using it with `get`/`set`.
    pub fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if self.contains(x, y) {
            Ok(())
        } else {
            Err(TranslucifyError::InvalidBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Read pixel (x, y).
    ///
    /// # Panics
    /// If (x, y) is outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        [
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ]
    }

    /// Write all four channels of pixel (x, y).
    ///
    /// # Panics
    /// If (x, y) is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) {
        assert!(
            self.contains(x, y),
            "pixel ({x}, {y}) outside {}x{} buffer",
            self.width(),
            self.height()
        );
        for (c, value) in color.into_iter().enumerate() {
            self.data[[y, x, c]] = value;
        }
    }

    /// Make pixel (x, y) fully transparent black.
    #[inline]
    pub fn erase(&mut self, x: usize, y: usize) {
        self.set(x, y, TRANSPARENT);
    }

    #[inline]
    pub fn is_transparent(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == TRANSPARENT
    }

    /// Number of pixels that are fully transparent black.
    pub fn count_transparent(&self) -> usize {
        self.data
            .lanes(Axis(2))
            .into_iter()
            .filter(|px| px.iter().all(|&v| v == 0))
            .count()
    }

    /// Borrow as a (height, width, 4) array view.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Flat RGBA bytes in row-major order.
    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_index_layout() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set(2, 1, [10, 20, 30, 40]);

        let raw = buffer.into_raw();
        let idx = (3 + 2) * 4;
        assert_eq!(&raw[idx..idx + 4], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            TranslucifyError::InvalidDimensions { width: 2, height: 2, len: 15 }
        ));
    }

    #[test]
    fn test_from_array_rejects_rgb() {
        let rgb = Array3::<u8>::zeros((2, 2, 3));
        assert!(PixelBuffer::from_array(rgb).is_err());
    }

    #[test]
    fn test_from_array_normalizes_layout() {
        // Transposed view is not in standard layout
        let mut arr = Array3::<u8>::zeros((2, 3, 4));
        arr[[1, 2, 0]] = 99;
        let swapped = arr.clone().permuted_axes([1, 0, 2]);
        let buffer = PixelBuffer::from_array(swapped).unwrap();

        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.height(), 3);
        assert_eq!(buffer.get(1, 2)[0], 99);
        let raw = buffer.into_raw();
        assert_eq!(raw[(2 * 2 + 1) * 4], 99);
    }

    #[test]
    fn test_check_bounds() {
        let buffer = PixelBuffer::new(4, 3);
        assert!(buffer.check_bounds(3, 2).is_ok());
        assert!(matches!(
            buffer.check_bounds(4, 0),
            Err(TranslucifyError::InvalidBounds { x: 4, y: 0, width: 4, height: 3 })
        ));
        assert!(buffer.check_bounds(0, 3).is_err());
    }

    #[test]
    #[should_panic]
    fn test_set_out_of_range_panics() {
        let mut buffer = PixelBuffer::new(2, 2);
        buffer.set(2, 0, [1, 1, 1, 1]);
    }

    #[test]
    fn test_erase_and_count() {
        let mut buffer = PixelBuffer::filled(3, 3, [9, 9, 9, 255]);
        assert_eq!(buffer.count_transparent(), 0);
        buffer.erase(1, 1);
        buffer.erase(0, 2);
        assert!(buffer.is_transparent(1, 1));
        assert_eq!(buffer.count_transparent(), 2);
    }
}
