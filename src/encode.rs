//! Frame encoders.
//!
//! Two encoders run on the RGB buffer produced by the converter:
//! [`encode_color`] passes it through unchanged for the `P6` file, and
//! [`encode_grayscale`] collapses each pixel to one sample with caller-chosen
//! [`ChannelWeights`] for the `P5` file.
//!
//! # Example
//!
//! ```
//! use framepick::{ChannelWeights, PixelBuffer, SampleDepth, encode_grayscale};
//!
//! let rgb = PixelBuffer::new(1, 1, SampleDepth::Rgb, vec![255, 255, 255])?;
//! let gray = encode_grayscale(&rgb, ChannelWeights::BT601)?;
//! assert_eq!(gray.data(), &[255]);
//! # Ok::<(), framepick::FramepickError>(())
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    buffer::{PixelBuffer, SampleDepth, allocate},
    error::FramepickError,
};

/// Coefficients applied to the red, green and blue samples of a pixel.
///
/// No normalisation is applied: the weights are used exactly as given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    /// Red coefficient (`x`).
    pub red: f32,
    /// Green coefficient (`y`).
    pub green: f32,
    /// Blue coefficient (`z`).
    pub blue: f32,
}

impl ChannelWeights {
    /// ITU-R BT.601 luma weights.
    pub const BT601: ChannelWeights = ChannelWeights::new(0.299, 0.587, 0.114);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Weighted sum of one pixel, narrowed to a sample.
    ///
    /// The sum is evaluated in `f32` and narrowed with `as u8`: the
    /// fractional part is dropped, values below 0 become 0, values above 255
    /// become 255 and NaN becomes 0.
    #[inline]
    pub fn luminance(&self, red: u8, green: u8, blue: u8) -> u8 {
        (self.red * red as f32 + self.green * green as f32 + self.blue * blue as f32) as u8
    }

    /// `true` when every pixel maps into `[0, 255]` without saturating.
    pub fn is_in_range(&self) -> bool {
        let positive = self.red.max(0.0) + self.green.max(0.0) + self.blue.max(0.0);
        let negative = self.red.min(0.0) + self.green.min(0.0) + self.blue.min(0.0);
        self.red.is_finite()
            && self.green.is_finite()
            && self.blue.is_finite()
            && positive * 255.0 < 256.0
            && negative == 0.0
    }
}

impl Display for ChannelWeights {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}, {}, {}", self.red, self.green, self.blue)
    }
}

/// Frame an RGB buffer for the colour pixel map.
///
/// The bytes are returned untouched.
///
/// # Errors
///
/// Returns [`FramepickError::UnexpectedSampleDepth`] for a grayscale buffer.
pub fn encode_color(rgb: PixelBuffer) -> Result<PixelBuffer, FramepickError> {
    expect_rgb(&rgb)?;
    Ok(rgb)
}

/// Reduce an RGB buffer to one sample per pixel.
///
/// Output sample `i` is [`ChannelWeights::luminance`] of input pixel `i`,
/// produced row by row.
///
/// # Errors
///
/// - [`FramepickError::UnexpectedSampleDepth`] for a grayscale input.
/// - [`FramepickError::Allocation`] if the output cannot be allocated.
pub fn encode_grayscale(
    rgb: &PixelBuffer,
    weights: ChannelWeights,
) -> Result<PixelBuffer, FramepickError> {
    expect_rgb(rgb)?;

    let (width, height) = (rgb.width(), rgb.height());
    let mut gray = allocate(SampleDepth::Gray.packed_len(width, height)?)?;

    for row in rgb.rows() {
        gray.extend(
            row.chunks_exact(3)
                .map(|pixel| weights.luminance(pixel[0], pixel[1], pixel[2])),
        );
    }

    PixelBuffer::new(width, height, SampleDepth::Gray, gray)
}

fn expect_rgb(buffer: &PixelBuffer) -> Result<(), FramepickError> {
    match buffer.depth() {
        SampleDepth::Rgb => Ok(()),
        found => Err(FramepickError::UnexpectedSampleDepth {
            expected: SampleDepth::Rgb,
            found,
        }),
    }
}
