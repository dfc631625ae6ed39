//! Decode progress reporting.
//!
//! Reaching frame N means decoding every frame before it, which can take a
//! while for large N. Implement [`ProgressCallback`] and pass it through
//! [`PipelineOptions::with_progress`](crate::PipelineOptions::with_progress)
//! to observe the scan.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use framepick::{PipelineOptions, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("decoded {} of {} frames", info.current, info.target + 1);
//!     }
//! }
//!
//! let options = PipelineOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// A snapshot of the decode scan.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Frames decoded so far.
    pub current: u64,
    /// The frame index being searched for.
    pub target: u64,
    /// Share of the scan completed (0.0 – 100.0).
    pub percentage: f32,
    /// Wall-clock time since decoding started.
    pub elapsed: Duration,
    /// Set on the last report of the scan.
    pub finished: bool,
}

/// Receives progress updates from the decode loop.
///
/// Callbacks observe the scan; they cannot stop it.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, info: &ProgressInfo);
}

/// Default callback; discards everything.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Counts decoded frames and fires the callback every `batch_size` frames.
pub struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    target: u64,
    current: u64,
    batch_size: u64,
    start_time: Instant,
    items_since_last_report: u64,
}

impl ProgressTracker {
    pub fn new(callback: Arc<dyn ProgressCallback>, target: u64, batch_size: u64) -> Self {
        Self {
            callback,
            target,
            current: 0,
            batch_size: batch_size.max(1),
            start_time: Instant::now(),
            items_since_last_report: 0,
        }
    }

    /// A tracker that reports to nobody.
    pub fn silent(target: u64) -> Self {
        Self::new(Arc::new(NoOpProgress), target, u64::MAX)
    }

    /// Record one decoded frame.
    pub fn advance(&mut self) {
        self.current += 1;
        self.items_since_last_report += 1;

        if self.items_since_last_report >= self.batch_size {
            self.report(false);
            self.items_since_last_report = 0;
        }
    }

    /// Emit the final report.
    pub fn finish(&mut self) {
        self.report(true);
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    fn report(&self, finished: bool) {
        let total = self.target.saturating_add(1);
        let percentage = (self.current.min(total) as f32 / total as f32) * 100.0;

        self.callback.on_progress(&ProgressInfo {
            current: self.current,
            target: self.target,
            percentage,
            elapsed: self.start_time.elapsed(),
            finished,
        });
    }
}
