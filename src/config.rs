//! Pipeline configuration.
//!
//! [`PipelineOptions`] is a builder carrying where the two pixel maps go,
//! which viewer (if any) opens them, and how decode progress is reported.
//! A default-constructed value writes `input.ppm` and `input.pgm` into the
//! working directory and opens each with the desktop's default viewer.
//!
//! # Example
//!
//! ```no_run
//! use framepick::{PipelineOptions, ViewerCommand};
//!
//! let options = PipelineOptions::new()
//!     .with_output_dir("out")
//!     .with_viewer(ViewerCommand::new("framepick-view"))
//!     .with_batch_size(100);
//! ```

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    buffer::SampleDepth,
    launch::ViewerCommand,
    progress::{NoOpProgress, ProgressCallback},
};

/// Default file name for the colour (`P6`) map.
pub const DEFAULT_COLOR_FILE_NAME: &str = "input.ppm";
/// Default file name for the grayscale (`P5`) map.
pub const DEFAULT_GRAY_FILE_NAME: &str = "input.pgm";

/// Settings for [`FramePipeline`](crate::FramePipeline).
#[derive(Clone)]
pub struct PipelineOptions {
    pub(crate) output_dir: PathBuf,
    pub(crate) color_file_name: String,
    pub(crate) gray_file_name: String,
    /// `None` disables the launch step.
    pub(crate) viewer: Option<ViewerCommand>,
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Fire the progress callback every N decoded frames.
    pub(crate) batch_size: u64,
}

impl Debug for PipelineOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("PipelineOptions")
            .field("output_dir", &self.output_dir)
            .field("color_file_name", &self.color_file_name)
            .field("gray_file_name", &self.gray_file_name)
            .field("viewer", &self.viewer)
            .field("batch_size", &self.batch_size)
            .finish_non_exhaustive()
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            color_file_name: DEFAULT_COLOR_FILE_NAME.to_string(),
            gray_file_name: DEFAULT_GRAY_FILE_NAME.to_string(),
            viewer: Some(ViewerCommand::system_default()),
            progress: Arc::new(NoOpProgress),
            batch_size: 1,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory both pixel maps are written into. It must already exist.
    pub fn with_output_dir<P: AsRef<Path>>(mut self, output_dir: P) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_color_file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.color_file_name = name.into();
        self
    }

    pub fn with_gray_file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.gray_file_name = name.into();
        self
    }

    /// Open each written file with `viewer`.
    pub fn with_viewer(mut self, viewer: ViewerCommand) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Skip the launch step entirely.
    pub fn without_viewer(mut self) -> Self {
        self.viewer = None;
        self
    }

    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Report progress every `batch_size` decoded frames (minimum 1).
    pub fn with_batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn viewer(&self) -> Option<&ViewerCommand> {
        self.viewer.as_ref()
    }

    /// Where the map for `depth` will be written.
    pub fn output_path(&self, depth: SampleDepth) -> PathBuf {
        let name = match depth {
            SampleDepth::Rgb => &self.color_file_name,
            SampleDepth::Gray => &self.gray_file_name,
        };
        self.output_dir.join(name)
    }
}
