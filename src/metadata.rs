//! Video stream metadata.
//!
//! Read once by [`VideoSource::open`](crate::VideoSource::open) from the
//! container and codec parameters, without decoding anything.

/// Metadata for the selected video stream.
#[derive(Debug, Clone)]
#[must_use]
pub struct VideoMetadata {
    /// Frame width in pixels as declared by the codec parameters.
    pub width: u32,
    /// Frame height in pixels as declared by the codec parameters.
    pub height: u32,
    /// Average frames per second, or `0.0` if the container does not say.
    pub frames_per_second: f64,
    /// Estimated frame count from duration and frame rate. Only a hint: the
    /// decode loop is the authority on whether a frame exists.
    pub frame_count: u64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    pub codec: String,
    /// Native pixel format name, if the parameters declare one.
    pub pixel_format_name: Option<String>,
    /// Index of the stream within the container.
    pub stream_index: usize,
    /// Container format name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub container: String,
}
