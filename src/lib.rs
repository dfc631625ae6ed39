//! # framepick
//!
//! Pick one frame out of a video and dump it as two pixel maps: the frame in
//! full colour (`P6`) and a grayscale version (`P5`) built from caller-chosen
//! red/green/blue weights. Each written file can then be handed to a viewer
//! process.
//!
//! Decoding and colour conversion are done by FFmpeg via
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next).
//!
//! ## Quick Start
//!
//! ```no_run
//! use framepick::{ChannelWeights, FramePipeline, PipelineOptions};
//!
//! let pipeline = FramePipeline::new(PipelineOptions::new().with_output_dir("out"));
//! let report = pipeline.run("input.mp4", 100, ChannelWeights::new(0.299, 0.587, 0.114))?;
//! println!("{}x{} frame {}", report.width, report.height, report.frame_number);
//! # Ok::<(), framepick::FramepickError>(())
//! ```
//!
//! ## Step by step
//!
//! ```no_run
//! use framepick::{
//!     ChannelWeights, ProgressTracker, RgbConverter, VideoSource, encode_grayscale, pixmap,
//! };
//!
//! let mut source = VideoSource::open("input.mp4")?;
//! let decoded = source.decode_frame(0, &mut ProgressTracker::silent(0))?;
//! let rgb = RgbConverter::for_frame(&decoded.frame)?.convert(&decoded.frame)?;
//! let gray = encode_grayscale(&rgb, ChannelWeights::BT601)?;
//! pixmap::save("frame.ppm", &rgb)?;
//! pixmap::save("frame.pgm", &gray)?;
//! # Ok::<(), framepick::FramepickError>(())
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on the system.

pub mod buffer;
pub mod config;
pub mod conversion;
pub mod encode;
pub mod error;
pub mod ffmpeg;
pub mod launch;
pub mod metadata;
pub mod pipeline;
pub mod pixmap;
pub mod preview;
pub mod progress;
pub mod source;

pub use buffer::{PixelBuffer, SampleDepth};
pub use config::{DEFAULT_COLOR_FILE_NAME, DEFAULT_GRAY_FILE_NAME, PipelineOptions};
pub use conversion::RgbConverter;
pub use encode::{ChannelWeights, encode_color, encode_grayscale};
pub use error::FramepickError;
pub use ffmpeg::{CodecLogLevel, set_codec_log_level};
pub use launch::{LaunchOutcome, ViewerCommand, launch_all};
pub use metadata::VideoMetadata;
pub use pipeline::{FramePipeline, PipelineReport, SkippedWrite, WrittenPixelMap};
pub use progress::{ProgressCallback, ProgressInfo, ProgressTracker};
pub use source::{DecodedFrame, VideoSource};
