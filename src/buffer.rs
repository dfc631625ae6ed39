//! Tightly packed pixel buffers.
//!
//! A [`PixelBuffer`] is what leaves the converter and what the pixel-map
//! writer consumes: row-major samples with no row padding, either three bytes
//! per pixel (RGB) or one (grayscale).

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::FramepickError;

/// Number of 8-bit samples stored per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleDepth {
    /// One byte per pixel. Written as `P5`.
    Gray,
    /// Three bytes per pixel, in R, G, B order. Written as `P6`.
    Rgb,
}

impl SampleDepth {
    /// Bytes occupied by a single pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            SampleDepth::Gray => 1,
            SampleDepth::Rgb => 3,
        }
    }

    /// The pixel-map magic token for this depth.
    pub fn magic(self) -> &'static str {
        match self {
            SampleDepth::Gray => "P5",
            SampleDepth::Rgb => "P6",
        }
    }

    /// Byte length of a tightly packed `width × height` image at this depth.
    ///
    /// `None` when the length does not fit in `usize`.
    pub fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(self.bytes_per_pixel())
    }

    /// [`buffer_len`](SampleDepth::buffer_len), with overflow reported as
    /// [`FramepickError::DimensionsTooLarge`].
    pub(crate) fn packed_len(self, width: u32, height: u32) -> Result<usize, FramepickError> {
        self.buffer_len(width, height)
            .ok_or(FramepickError::DimensionsTooLarge {
                width,
                height,
                depth: self,
            })
    }
}

impl Display for SampleDepth {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SampleDepth::Gray => write!(f, "grayscale"),
            SampleDepth::Rgb => write!(f, "RGB"),
        }
    }
}

/// An owned, tightly packed image.
///
/// The length of [`data`](PixelBuffer::data) is always
/// `width × height × depth.bytes_per_pixel()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    depth: SampleDepth,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap `data` as a `width × height` image.
    ///
    /// # Errors
    ///
    /// - [`FramepickError::DimensionsTooLarge`] if the packed size overflows.
    /// - [`FramepickError::BufferSizeMismatch`] if `data` is not exactly the
    ///   packed size.
    pub fn new(
        width: u32,
        height: u32,
        depth: SampleDepth,
        data: Vec<u8>,
    ) -> Result<Self, FramepickError> {
        let expected = depth.packed_len(width, height)?;
        if data.len() != expected {
            return Err(FramepickError::BufferSizeMismatch {
                width,
                height,
                depth,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> SampleDepth {
        self.depth
    }

    /// Raw samples, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over rows of `width × bytes_per_pixel` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let row_len = (self.width as usize * self.depth.bytes_per_pixel()).max(1);
        self.data.chunks_exact(row_len)
    }
}

/// Reserve an empty vector able to hold `bytes` without reallocating.
///
/// Allocation failure is reported instead of aborting the process.
pub(crate) fn allocate(bytes: usize) -> Result<Vec<u8>, FramepickError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(bytes)
        .map_err(|_| FramepickError::Allocation { bytes })?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impossible_allocation_is_an_error() {
        let result = allocate(usize::MAX);
        assert!(matches!(
            result,
            Err(FramepickError::Allocation { bytes }) if bytes == usize::MAX
        ));
    }

    #[test]
    fn overflowing_dimensions_have_no_length() {
        assert_eq!(SampleDepth::Rgb.buffer_len(u32::MAX, u32::MAX), None);
        assert_eq!(SampleDepth::Gray.buffer_len(3, 2), Some(6));

        let result = PixelBuffer::new(u32::MAX, u32::MAX, SampleDepth::Rgb, vec![0; 3]);
        assert!(matches!(
            result,
            Err(FramepickError::DimensionsTooLarge {
                width: u32::MAX,
                height: u32::MAX,
                depth: SampleDepth::Rgb,
            })
        ));
    }

    #[test]
    fn allocation_reserves_without_filling() {
        let buffer = allocate(12).unwrap();
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 12);
    }
}
