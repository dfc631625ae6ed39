//! Viewer launch.
//!
//! Each written pixel map is handed to an independent viewer process. The
//! path is passed as an explicit argument; nothing else is shared. Launches
//! are fire-and-forget: the child is never waited on and a failed spawn is
//! reported without affecting the pipeline's result.

use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::FramepickError;

/// A program (plus leading arguments) that displays one image file.
///
/// The file path is appended as the last argument on every spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ViewerCommand {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    /// Add an argument placed before the file path.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// The desktop's default file opener.
    pub fn system_default() -> Self {
        if cfg!(target_os = "windows") {
            // `start` treats its first quoted argument as a window title.
            Self::new("cmd").arg("/C").arg("start").arg("")
        } else if cfg!(target_os = "macos") {
            Self::new("open")
        } else {
            Self::new("xdg-open")
        }
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Start the viewer on `path` and return without waiting for it.
    ///
    /// The child gets no standard input; its output goes to our terminal.
    ///
    /// # Errors
    ///
    /// Returns [`FramepickError::Launch`] if the process cannot be spawned.
    pub fn spawn(&self, path: &Path) -> Result<u32, FramepickError> {
        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .spawn()
            .map_err(|source| FramepickError::Launch {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        let pid = child.id();
        log::debug!(
            "Launched {} for {} (pid {pid})",
            self.program.to_string_lossy(),
            path.display()
        );
        Ok(pid)
    }
}

impl Default for ViewerCommand {
    fn default() -> Self {
        Self::system_default()
    }
}

/// Result of launching one viewer.
#[derive(Debug)]
pub struct LaunchOutcome {
    /// File the viewer was asked to display.
    pub path: PathBuf,
    /// Process id on success.
    pub result: Result<u32, FramepickError>,
}

impl LaunchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Launch one viewer per path, in order.
///
/// Failures are logged and collected; every path is attempted.
pub fn launch_all(viewer: &ViewerCommand, paths: &[PathBuf]) -> Vec<LaunchOutcome> {
    paths
        .iter()
        .map(|path| {
            let result = viewer.spawn(path);
            if let Err(error) = &result {
                log::warn!("{error}");
            }
            LaunchOutcome {
                path: path.clone(),
                result,
            }
        })
        .collect()
}
