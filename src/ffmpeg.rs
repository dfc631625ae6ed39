//! FFmpeg console verbosity.
//!
//! FFmpeg writes its own diagnostics straight to stderr, independent of the
//! `log` facade this crate uses. [`set_codec_log_level`] tunes that output so
//! callers do not have to depend on `ffmpeg-next` themselves.
//!
//! ```no_run
//! use framepick::CodecLogLevel;
//!
//! framepick::set_codec_log_level(CodecLogLevel::Error);
//! ```

use std::str::FromStr;

use ffmpeg_next::util::log::Level;

/// FFmpeg's `AV_LOG_*` levels, quietest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecLogLevel {
    Quiet,
    Panic,
    Fatal,
    Error,
    Warning,
    Info,
    Verbose,
    Debug,
    Trace,
}

impl From<CodecLogLevel> for Level {
    fn from(level: CodecLogLevel) -> Self {
        match level {
            CodecLogLevel::Quiet => Level::Quiet,
            CodecLogLevel::Panic => Level::Panic,
            CodecLogLevel::Fatal => Level::Fatal,
            CodecLogLevel::Error => Level::Error,
            CodecLogLevel::Warning => Level::Warning,
            CodecLogLevel::Info => Level::Info,
            CodecLogLevel::Verbose => Level::Verbose,
            CodecLogLevel::Debug => Level::Debug,
            CodecLogLevel::Trace => Level::Trace,
        }
    }
}

impl FromStr for CodecLogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Ok(CodecLogLevel::Quiet),
            "panic" => Ok(CodecLogLevel::Panic),
            "fatal" => Ok(CodecLogLevel::Fatal),
            "error" => Ok(CodecLogLevel::Error),
            "warning" | "warn" => Ok(CodecLogLevel::Warning),
            "info" => Ok(CodecLogLevel::Info),
            "verbose" => Ok(CodecLogLevel::Verbose),
            "debug" => Ok(CodecLogLevel::Debug),
            "trace" => Ok(CodecLogLevel::Trace),
            other => Err(format!("unknown FFmpeg log level: {other}")),
        }
    }
}

/// Set what FFmpeg itself prints to stderr.
pub fn set_codec_log_level(level: CodecLogLevel) {
    ffmpeg_next::util::log::set_level(level.into());
}
