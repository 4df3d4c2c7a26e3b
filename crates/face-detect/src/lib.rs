//! Face Detection Boundary
//!
//! Answers one question per frame: are there face-like regions, and where.
//! The tracking core consumes the answer as a black box through the
//! [`FaceDetect`] trait; detector tuning lives entirely in this crate.

pub mod bbox;
pub mod cascade;

pub use bbox::{Detection, FaceBbox};
pub use cascade::{CascadeConfig, CascadeDetector};

use frame_source::VideoFrame;
use thiserror::Error;

/// Detection error types
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("Frame is empty")]
    EmptyFrame,

    #[error("Frame dimensions too small: {width}x{height}, need at least {min}x{min}")]
    FrameTooSmall { width: u32, height: u32, min: u32 },
}

/// A face detector usable by the pipeline.
pub trait FaceDetect {
    /// Detect face-like regions in one frame.
    fn detect(&self, frame: &VideoFrame) -> Result<Detection, DetectError>;
}

/// Detector double replaying a fixed sequence of detection results.
///
/// Once the script is exhausted the last entry repeats.
pub struct ScriptedDetector {
    script: Vec<Detection>,
    cursor: std::cell::Cell<usize>,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Detection>) -> Self {
        Self {
            script,
            cursor: std::cell::Cell::new(0),
        }
    }
}

impl FaceDetect for ScriptedDetector {
    fn detect(&self, _frame: &VideoFrame) -> Result<Detection, DetectError> {
        if self.script.is_empty() {
            return Ok(Detection::none());
        }
        let i = self.cursor.get().min(self.script.len() - 1);
        self.cursor.set(i + 1);
        Ok(self.script[i].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_detector_replays_then_repeats() {
        let det = ScriptedDetector::new(vec![
            Detection::of(vec![FaceBbox::new(10, 10, 60, 60)]),
            Detection::none(),
        ]);
        let frame = VideoFrame::new(vec![0; 12], 2, 2, 0, 0);

        assert!(det.detect(&frame).unwrap().present);
        assert!(!det.detect(&frame).unwrap().present);
        // Exhausted script repeats the last entry
        assert!(!det.detect(&frame).unwrap().present);
    }
}
