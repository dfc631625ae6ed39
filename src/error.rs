//! Error types for the `framepick` crate.
//!
//! This module defines [`FramepickError`], the error type returned by every
//! fallible step of the pipeline. Variants carry the path, frame number, or
//! upstream message needed to report the failure to an operator without any
//! extra logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

use crate::buffer::SampleDepth;

/// The unified error type for all `framepick` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FramepickError {
    /// The media container could not be opened or has no stream information.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The container holds no video-typed stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// No decoder is available for the selected stream's codec.
    #[error("Unsupported codec: no decoder available for {codec}")]
    UnsupportedCodec {
        /// Codec name as reported by the container.
        codec: String,
    },

    /// The pixel-format converter could not be built for the format pair.
    #[error("Could not initialise the RGB converter: {0}")]
    ConversionInit(String),

    /// The stream ended before the target frame was decoded.
    #[error("Frame {frame_number} was not found in the video ({decoded_frames} frames decoded)")]
    FrameNotFound {
        /// The zero-based frame index that was requested.
        frame_number: u64,
        /// How many frames were decoded before the stream ran out.
        decoded_frames: u64,
    },

    /// An output pixel-map file could not be created or truncated.
    #[error("Could not open {path} for writing: {source}")]
    OutputOpen {
        /// Destination that failed.
        path: PathBuf,
        /// Error from the filesystem.
        #[source]
        source: IoError,
    },

    /// A pixel buffer could not be allocated.
    #[error("Failed to allocate a {bytes}-byte pixel buffer")]
    Allocation {
        /// Requested size in bytes.
        bytes: usize,
    },

    /// A buffer with the wrong sample depth was handed to an encoder.
    #[error("Expected a {expected} buffer, got {found}")]
    UnexpectedSampleDepth {
        /// Depth the operation needs.
        expected: SampleDepth,
        /// Depth it was given.
        found: SampleDepth,
    },

    /// Buffer length does not match `width × height × depth`.
    #[error("Pixel buffer holds {actual} bytes but {width}x{height} {depth} needs {expected}")]
    BufferSizeMismatch {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Sample depth of the buffer.
        depth: SampleDepth,
        /// Required byte count.
        expected: usize,
        /// Byte count supplied.
        actual: usize,
    },

    /// `width × height × depth` does not fit in the address space.
    #[error("A {width}x{height} {depth} image is too large to address")]
    DimensionsTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Sample depth of the image.
        depth: SampleDepth,
    },

    /// A pixel-map file could not be parsed.
    #[error("Invalid pixel map: {0}")]
    InvalidPixelMap(String),

    /// A viewer process could not be started.
    #[error("Failed to launch viewer {program}: {source}")]
    Launch {
        /// Program that was spawned.
        program: String,
        /// Error from the OS process launcher.
        #[source]
        source: IoError,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate while preparing a preview.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for FramepickError {
    fn from(error: FfmpegError) -> Self {
        FramepickError::FfmpegError(error.to_string())
    }
}
