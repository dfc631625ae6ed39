//! The extraction pipeline.
//!
//! One run is a straight line: open → decode up to the target frame →
//! convert to RGB → encode colour and grayscale → write both maps → launch a
//! viewer per written map. Every failure before the writes ends the run.
//! A failed write only skips that file, and launch failures are only
//! recorded.

use std::path::{Path, PathBuf};

use crate::{
    buffer::{PixelBuffer, SampleDepth},
    config::PipelineOptions,
    conversion::RgbConverter,
    encode::{ChannelWeights, encode_color, encode_grayscale},
    error::FramepickError,
    launch::{LaunchOutcome, launch_all},
    metadata::VideoMetadata,
    pixmap,
    progress::ProgressTracker,
    source::VideoSource,
};

/// A pixel map that reached disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPixelMap {
    pub path: PathBuf,
    pub depth: SampleDepth,
}

/// A pixel map that could not be written.
#[derive(Debug)]
pub struct SkippedWrite {
    pub path: PathBuf,
    pub depth: SampleDepth,
    pub error: FramepickError,
}

/// What a successful run produced.
///
/// The written paths are the handoff to whoever displays the frame.
#[derive(Debug)]
pub struct PipelineReport {
    /// Index of the extracted frame.
    pub frame_number: u64,
    /// Dimensions shared by the frame and both maps.
    pub width: u32,
    pub height: u32,
    pub weights: ChannelWeights,
    /// Metadata of the stream the frame came from.
    pub video: VideoMetadata,
    /// Maps written, colour first.
    pub written: Vec<WrittenPixelMap>,
    pub skipped: Vec<SkippedWrite>,
    /// Empty when the launch step is disabled.
    pub launches: Vec<LaunchOutcome>,
}

impl PipelineReport {
    pub fn written_paths(&self) -> Vec<PathBuf> {
        self.written.iter().map(|map| map.path.clone()).collect()
    }

    pub fn path_for(&self, depth: SampleDepth) -> Option<&Path> {
        self.written
            .iter()
            .find(|map| map.depth == depth)
            .map(|map| map.path.as_path())
    }

    /// Both maps written and every launched viewer started.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.launches.iter().all(LaunchOutcome::is_ok)
    }
}

/// Runs the extraction pipeline with a fixed set of [`PipelineOptions`].
///
/// # Example
///
/// ```no_run
/// use framepick::{ChannelWeights, FramePipeline, PipelineOptions};
///
/// let pipeline = FramePipeline::new(PipelineOptions::new().without_viewer());
/// let report = pipeline.run("input.mp4", 120, ChannelWeights::BT601)?;
/// for path in report.written_paths() {
///     println!("wrote {}", path.display());
/// }
/// # Ok::<(), framepick::FramepickError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FramePipeline {
    options: PipelineOptions,
}

impl FramePipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Extract frame `frame_number` of `input` and write both maps.
    ///
    /// # Errors
    ///
    /// Any open, decode, conversion or allocation failure. Nothing is
    /// written in that case. Write and launch failures are reported through
    /// [`PipelineReport::skipped`] and [`PipelineReport::launches`] instead.
    pub fn run<P: AsRef<Path>>(
        &self,
        input: P,
        frame_number: u64,
        weights: ChannelWeights,
    ) -> Result<PipelineReport, FramepickError> {
        let mut source = VideoSource::open(input)?;
        let mut tracker = ProgressTracker::new(
            self.options.progress.clone(),
            frame_number,
            self.options.batch_size,
        );

        let decoded = source.decode_frame(frame_number, &mut tracker)?;
        let mut converter = RgbConverter::for_frame(&decoded.frame)?;
        let rgb = converter.convert(&decoded.frame)?;
        drop(decoded);

        let gray = encode_grayscale(&rgb, weights)?;
        let color = encode_color(rgb)?;

        let mut written = Vec::with_capacity(2);
        let mut skipped = Vec::new();
        for buffer in [&color, &gray] {
            match self.write(buffer) {
                Ok(map) => written.push(map),
                Err(skip) => skipped.push(skip),
            }
        }

        let launches = match &self.options.viewer {
            Some(viewer) => {
                let paths: Vec<PathBuf> = written.iter().map(|map| map.path.clone()).collect();
                launch_all(viewer, &paths)
            }
            None => Vec::new(),
        };

        Ok(PipelineReport {
            frame_number,
            width: color.width(),
            height: color.height(),
            weights,
            video: source.metadata().clone(),
            written,
            skipped,
            launches,
        })
    }

    fn write(&self, buffer: &PixelBuffer) -> Result<WrittenPixelMap, SkippedWrite> {
        let depth = buffer.depth();
        let path = self.options.output_path(depth);
        match pixmap::save(&path, buffer) {
            Ok(path) => {
                log::info!("Saved {depth} frame to {}", path.display());
                Ok(WrittenPixelMap { path, depth })
            }
            Err(error) => {
                log::warn!("Skipping {depth} map: {error}");
                Err(SkippedWrite { path, depth, error })
            }
        }
    }
}
