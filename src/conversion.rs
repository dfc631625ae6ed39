//! Native pixel format to packed RGB.
//!
//! [`RgbConverter`] wraps an FFmpeg software scaler configured with identical
//! source and destination dimensions, so it acts purely as a format
//! converter. Its output is stripped of row padding before it leaves this
//! module.

use ffmpeg_next::{
    format::Pixel,
    frame::Video as VideoFrame,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};

use crate::{
    buffer::{PixelBuffer, SampleDepth, allocate},
    error::FramepickError,
};

/// Converts decoded frames of one native format and size into RGB24.
pub struct RgbConverter {
    scaler: ScalingContext,
    source_format: Pixel,
    width: u32,
    height: u32,
}

impl RgbConverter {
    /// Build a converter for `width × height` frames in `source_format`.
    ///
    /// Uses bilinear resampling, which is a no-op on geometry here since the
    /// sizes match.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::ConversionInit`] if FFmpeg cannot convert
    /// from `source_format` (e.g. an unknown or hardware-only format).
    pub fn new(source_format: Pixel, width: u32, height: u32) -> Result<Self, FramepickError> {
        let scaler = ScalingContext::get(
            source_format,
            width,
            height,
            Pixel::RGB24,
            width,
            height,
            ScalingFlags::BILINEAR,
        )
        .map_err(|error| {
            FramepickError::ConversionInit(format!(
                "{source_format:?} {width}x{height} -> RGB24: {error}"
            ))
        })?;

        log::debug!("RGB converter ready: {source_format:?} {width}x{height} -> RGB24");

        Ok(Self {
            scaler,
            source_format,
            width,
            height,
        })
    }

    /// Build a converter matching a decoded frame.
    pub fn for_frame(frame: &VideoFrame) -> Result<Self, FramepickError> {
        Self::new(frame.format(), frame.width(), frame.height())
    }

    pub fn source_format(&self) -> Pixel {
        self.source_format
    }

    /// Convert `frame` into a tightly packed RGB buffer.
    ///
    /// # Errors
    ///
    /// - [`FramepickError::FfmpegError`] if scaling fails.
    /// - [`FramepickError::Allocation`] if the output cannot be allocated.
    pub fn convert(&mut self, frame: &VideoFrame) -> Result<PixelBuffer, FramepickError> {
        let mut rgb_frame = VideoFrame::empty();
        self.scaler.run(frame, &mut rgb_frame)?;
        let data = frame_to_buffer(&rgb_frame, self.width, self.height, 3)?;
        PixelBuffer::new(self.width, self.height, SampleDepth::Rgb, data)
    }
}

/// Copy plane 0 of `video_frame` into a buffer without row padding.
///
/// FFmpeg frames often carry a stride wider than `width × bytes_per_pixel`;
/// only the visible part of each row is kept.
pub(crate) fn frame_to_buffer(
    video_frame: &VideoFrame,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
) -> Result<Vec<u8>, FramepickError> {
    let stride = video_frame.stride(0);
    let row_len = width as usize * bytes_per_pixel;
    let rows = height as usize;
    let data = video_frame.data(0);

    let mut buffer = allocate(row_len * rows)?;
    if stride == row_len {
        buffer.extend_from_slice(&data[..row_len * rows]);
    } else {
        for row in 0..rows {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + row_len]);
        }
    }
    Ok(buffer)
}
