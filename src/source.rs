//! Container demuxing and sequential frame decoding.
//!
//! [`VideoSource`] opens a media container, selects the first video stream,
//! and decodes it front to back until a requested frame index is produced.
//! Frames are counted in decode order starting at 0; every frame before the
//! target is decoded and discarded. No seeking is performed, so the cost is
//! linear in the target index.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};

use ffmpeg_next::{
    Rational,
    codec::{Id as CodecId, context::Context as CodecContext, decoder::Video as VideoDecoder},
    format::context::Input,
    frame::Video as VideoFrame,
    media::Type,
};

use crate::{error::FramepickError, metadata::VideoMetadata, progress::ProgressTracker};

/// An opened container positioned at the start of its first video stream.
///
/// # Example
///
/// ```no_run
/// use framepick::{ProgressTracker, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// let decoded = source.decode_frame(42, &mut ProgressTracker::silent(42))?;
/// println!("frame {} is {}x{}", decoded.frame_number, decoded.width(), decoded.height());
/// # Ok::<(), framepick::FramepickError>(())
/// ```
pub struct VideoSource {
    input_context: Input,
    decoder: VideoDecoder,
    metadata: VideoMetadata,
    path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("metadata", &self.metadata)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// The frame found at the target index, still in its native pixel format.
pub struct DecodedFrame {
    /// Zero-based index of the frame in decode order.
    pub frame_number: u64,
    /// The decoded picture.
    pub frame: VideoFrame,
}

impl DecodedFrame {
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }
}

impl Debug for DecodedFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DecodedFrame")
            .field("frame_number", &self.frame_number)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("format", &self.frame.format())
            .finish()
    }
}

impl VideoSource {
    /// Open `path` and prepare a decoder for its first video stream.
    ///
    /// # Errors
    ///
    /// - [`FramepickError::FileOpen`] if the container cannot be opened or
    ///   its stream information cannot be read.
    /// - [`FramepickError::NoVideoStream`] if no stream is video-typed.
    /// - [`FramepickError::UnsupportedCodec`] if no decoder exists for the
    ///   stream's codec.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FramepickError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening media file: {}", path.display());

        ffmpeg_next::init().map_err(|error| FramepickError::FileOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        // Opens the container and reads its stream information.
        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| FramepickError::FileOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let (stream_index, codec_parameters, frames_per_second) = {
            let stream = input_context
                .streams()
                .find(|stream| stream.parameters().medium() == Type::Video)
                .ok_or(FramepickError::NoVideoStream)?;
            let frames_per_second = rational_to_f64(stream.avg_frame_rate())
                .or_else(|| rational_to_f64(stream.rate()))
                .unwrap_or(0.0);
            (stream.index(), stream.parameters(), frames_per_second)
        };

        let codec_id = codec_parameters.id();
        let codec = codec_id.name().to_string();
        require_decoder(codec_id)?;

        let decoder_context = CodecContext::from_parameters(codec_parameters).map_err(|error| {
            FramepickError::FfmpegError(format!(
                "Could not copy codec parameters for stream {stream_index}: {error}"
            ))
        })?;
        let decoder = decoder_context.decoder().video().map_err(|error| {
            FramepickError::FfmpegError(format!("Could not open {codec} decoder: {error}"))
        })?;

        let duration_microseconds = input_context.duration();
        let frame_count = if duration_microseconds > 0 && frames_per_second > 0.0 {
            (duration_microseconds as f64 / 1_000_000.0 * frames_per_second) as u64
        } else {
            0
        };

        let pixel_format_name = {
            let name = format!("{:?}", decoder.format());
            if name == "None" { None } else { Some(name) }
        };

        let metadata = VideoMetadata {
            width: decoder.width(),
            height: decoder.height(),
            frames_per_second,
            frame_count,
            codec,
            pixel_format_name,
            stream_index,
            container: input_context.format().name().to_string(),
        };

        log::info!(
            "Opened {} (format={}, video stream {}: {}x{}, {:.2} fps, codec={}, ~{} frames)",
            path.display(),
            metadata.container,
            metadata.stream_index,
            metadata.width,
            metadata.height,
            metadata.frames_per_second,
            metadata.codec,
            metadata.frame_count,
        );

        Ok(Self {
            input_context,
            decoder,
            metadata,
            path,
        })
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode forward until frame `target` (zero-based) is produced.
    ///
    /// Reading stops as soon as the target frame comes out of the decoder.
    /// At end of stream the decoder is drained so that frames it was still
    /// holding are counted too. If the decoder rejects a packet the scan
    /// stops there.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::FrameNotFound`] if the stream runs out
    /// before `target` is reached.
    pub fn decode_frame(
        &mut self,
        target: u64,
        progress: &mut ProgressTracker,
    ) -> Result<DecodedFrame, FramepickError> {
        let stream_index = self.metadata.stream_index;
        let mut decoded = VideoFrame::empty();
        let mut frame_number: u64 = 0;
        let mut reached_end_of_stream = true;

        log::debug!("Scanning stream {stream_index} for frame {target}");

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != stream_index {
                continue;
            }

            if let Err(error) = self.decoder.send_packet(&packet) {
                log::warn!("Decoder rejected a packet after {frame_number} frames: {error}");
                reached_end_of_stream = false;
                break;
            }

            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if frame_number == target {
                    progress.finish();
                    log::info!("Target frame {frame_number} reached");
                    return Ok(DecodedFrame {
                        frame_number,
                        frame: decoded,
                    });
                }
                frame_number += 1;
                progress.advance();
            }
        }

        if reached_end_of_stream && self.decoder.send_eof().is_ok() {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if frame_number == target {
                    progress.finish();
                    log::info!("Target frame {frame_number} reached while draining");
                    return Ok(DecodedFrame {
                        frame_number,
                        frame: decoded,
                    });
                }
                frame_number += 1;
                progress.advance();
            }
        }

        progress.finish();
        Err(FramepickError::FrameNotFound {
            frame_number: target,
            decoded_frames: frame_number,
        })
    }
}

fn rational_to_f64(rate: Rational) -> Option<f64> {
    if rate.denominator() != 0 && rate.numerator() > 0 {
        Some(rate.numerator() as f64 / rate.denominator() as f64)
    } else {
        None
    }
}

/// Fail with [`FramepickError::UnsupportedCodec`] when this FFmpeg build has
/// no decoder for `codec_id`.
fn require_decoder(codec_id: CodecId) -> Result<(), FramepickError> {
    match ffmpeg_next::codec::decoder::find(codec_id) {
        Some(_) => Ok(()),
        None => Err(FramepickError::UnsupportedCodec {
            codec: codec_id.name().to_string(),
        }),
    }
}
