//! Preparing pixel maps for display.
//!
//! Display surfaces want RGB, so grayscale maps are expanded to three equal
//! channels first. The image is then stretched with a bilinear filter to
//! exactly the surface size; aspect ratio is not preserved.

use image::{
    DynamicImage, GrayImage, RgbImage,
    imageops::{self, FilterType},
};

use crate::{
    buffer::{PixelBuffer, SampleDepth},
    error::FramepickError,
};

/// Default display surface width in pixels.
pub const DEFAULT_SURFACE_WIDTH: u32 = 800;
/// Default display surface height in pixels.
pub const DEFAULT_SURFACE_HEIGHT: u32 = 600;

/// Convert a buffer of either depth into an RGB image.
pub fn to_rgb_image(buffer: &PixelBuffer) -> Result<RgbImage, FramepickError> {
    let (width, height) = (buffer.width(), buffer.height());
    let data = buffer.data().to_vec();

    let image = match buffer.depth() {
        SampleDepth::Rgb => RgbImage::from_raw(width, height, data),
        SampleDepth::Gray => GrayImage::from_raw(width, height, data)
            .map(|gray| DynamicImage::ImageLuma8(gray).to_rgb8()),
    };

    image.ok_or_else(|| {
        FramepickError::InvalidPixelMap(format!(
            "{width}x{height} {} buffer does not fit an image",
            buffer.depth()
        ))
    })
}

/// Convert to RGB and scale to `surface_width × surface_height`.
///
/// # Errors
///
/// Returns [`FramepickError::InvalidPixelMap`] if the image or the surface
/// is empty.
pub fn scale_to_surface(
    buffer: &PixelBuffer,
    surface_width: u32,
    surface_height: u32,
) -> Result<RgbImage, FramepickError> {
    if surface_width == 0 || surface_height == 0 || buffer.width() == 0 || buffer.height() == 0 {
        return Err(FramepickError::InvalidPixelMap(format!(
            "cannot scale {}x{} to a {surface_width}x{surface_height} surface",
            buffer.width(),
            buffer.height()
        )));
    }

    let image = to_rgb_image(buffer)?;
    if image.dimensions() == (surface_width, surface_height) {
        return Ok(image);
    }
    Ok(imageops::resize(
        &image,
        surface_width,
        surface_height,
        FilterType::Triangle,
    ))
}
