//! Frame Acquisition for the Office Camera
//!
//! Supplies RGB video frames to the detection pipeline. The actual capture
//! backend is behind the [`FrameSource`] trait; the crate ships a
//! deterministic synthetic source for demos and tests. A real webcam
//! backend plugs in by implementing the same trait.

pub mod frame;
pub mod synthetic;

pub use frame::VideoFrame;
pub use synthetic::SyntheticSource;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame acquisition error types
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Failed to open camera: {0}")]
    Open(String),

    #[error("Failed to capture frame: {0}")]
    Stream(String),

    #[error("Capture timeout")]
    Timeout,

    #[error("Camera not initialized")]
    NotInitialized,
}

/// Capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Device path (e.g., "/dev/video0")
    pub device: String,
    /// Capture width
    pub width: u32,
    /// Capture height
    pub height: u32,
    /// Target FPS
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::office()
    }
}

impl CaptureConfig {
    /// Single office webcam config
    pub fn office() -> Self {
        Self {
            device: "/dev/video0".to_string(),
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

/// A source of video frames, pulled once per tick.
///
/// Implementations report failures through [`CaptureError`]; the pipeline
/// translates those into absent observations rather than propagating them
/// into the tracking core.
pub trait FrameSource {
    /// Pull the next frame.
    fn next_frame(&mut self) -> Result<VideoFrame, CaptureError>;

    /// Restart the source after a failure. Default is a no-op for sources
    /// with no device state.
    fn restart(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}
