//! Pixel-map (`P5` / `P6`) files.
//!
//! The format is a three-field plaintext header followed by raw samples:
//!
//! ```text
//! P6
//! <width> <height>
//! 255
//! <width × height × 3 raw bytes>
//! ```
//!
//! `P5` is the one-byte-per-pixel grayscale variant. Both variants go through
//! the same writer and the same loader; only the [`SampleDepth`] differs.

use std::{
    fs::File,
    io::{BufWriter, Cursor, Read, Write},
    path::{Path, PathBuf},
};

use image::{
    ColorType, ImageError, ImageFormat, ImageReader,
    codecs::pnm::{PnmDecoder, PnmSubtype, SampleEncoding},
};

use crate::{
    buffer::{PixelBuffer, SampleDepth},
    error::FramepickError,
};

/// The only maximum sample value this crate reads or writes.
pub const MAX_SAMPLE_VALUE: u32 = 255;

/// Write the header for a `width × height` map at `depth`.
pub fn write_header<W: Write>(
    writer: &mut W,
    depth: SampleDepth,
    width: u32,
    height: u32,
) -> std::io::Result<()> {
    write!(
        writer,
        "{}\n{width} {height}\n{MAX_SAMPLE_VALUE}\n",
        depth.magic()
    )
}

/// Write `buffer` as a complete pixel map: header, then samples, no padding.
pub fn write_to<W: Write>(writer: &mut W, buffer: &PixelBuffer) -> std::io::Result<()> {
    write_header(writer, buffer.depth(), buffer.width(), buffer.height())?;
    writer.write_all(buffer.data())
}

/// Create (or truncate) `path` and write `buffer` into it.
///
/// Returns the path that was written.
///
/// # Errors
///
/// - [`FramepickError::OutputOpen`] if the file cannot be created.
/// - [`FramepickError::IoError`] if writing fails part-way.
pub fn save<P: AsRef<Path>>(path: P, buffer: &PixelBuffer) -> Result<PathBuf, FramepickError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| FramepickError::OutputOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    write_to(&mut writer, buffer)?;
    writer.flush()?;

    log::debug!(
        "Wrote {} map {}x{} ({} bytes) to {}",
        buffer.depth(),
        buffer.width(),
        buffer.height(),
        buffer.data().len(),
        path.display(),
    );
    Ok(path.to_path_buf())
}

/// Load a pixel map from disk.
///
/// See [`read_from`] for the meaning of `expected`.
pub fn load<P: AsRef<Path>>(
    path: P,
    expected: Option<SampleDepth>,
) -> Result<PixelBuffer, FramepickError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|error| {
        FramepickError::InvalidPixelMap(format!("cannot open {}: {error}", path.display()))
    })?;
    read_from(file, expected)
}

/// Parse a pixel map from `reader`.
///
/// `expected` restricts the accepted variant; `None` accepts both `P5` and
/// `P6`. Header parsing (whitespace, `#` comments) and decoding go through
/// the `image` crate's PNM codec. Bytes after the image body are ignored.
///
/// # Errors
///
/// Returns [`FramepickError::InvalidPixelMap`] for anything other than a
/// binary `P5`/`P6` map with maximum value 255, a malformed header, a short
/// body, or dimensions too large to decode.
pub fn read_from<R: Read>(
    mut reader: R,
    expected: Option<SampleDepth>,
) -> Result<PixelBuffer, FramepickError> {
    let mut contents = Vec::new();
    reader.read_to_end(&mut contents)?;

    let (_, header) = PnmDecoder::new(contents.as_slice())
        .map_err(invalid_pixel_map)?
        .into_inner();

    let subtype = header.subtype();
    let magic = String::from_utf8_lossy(subtype.magic_constant()).into_owned();
    let depth = match subtype {
        PnmSubtype::Graymap(SampleEncoding::Binary) => SampleDepth::Gray,
        PnmSubtype::Pixmap(SampleEncoding::Binary) => SampleDepth::Rgb,
        _ => {
            return Err(FramepickError::InvalidPixelMap(format!(
                "unsupported magic token {magic:?}"
            )));
        }
    };
    if let Some(expected) = expected.filter(|&expected| expected != depth) {
        return Err(FramepickError::InvalidPixelMap(format!(
            "expected a {} map ({}), found {magic}",
            expected,
            expected.magic()
        )));
    }

    let max_value = header.maximal_sample();
    if max_value != MAX_SAMPLE_VALUE {
        return Err(FramepickError::InvalidPixelMap(format!(
            "maximum value {max_value} is not supported (only {MAX_SAMPLE_VALUE})"
        )));
    }

    let image = ImageReader::with_format(Cursor::new(contents.as_slice()), ImageFormat::Pnm)
        .decode()
        .map_err(invalid_pixel_map)?;

    match (depth, image.color()) {
        (SampleDepth::Gray, ColorType::L8) | (SampleDepth::Rgb, ColorType::Rgb8) => {}
        (_, other) => {
            return Err(FramepickError::InvalidPixelMap(format!(
                "{magic} decoded to unsupported colour type {other:?}"
            )));
        }
    }

    PixelBuffer::new(image.width(), image.height(), depth, image.into_bytes())
}

fn invalid_pixel_map(error: ImageError) -> FramepickError {
    FramepickError::InvalidPixelMap(error.to_string())
}
