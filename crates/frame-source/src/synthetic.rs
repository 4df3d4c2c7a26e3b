//! Synthetic frame generator
//!
//! Renders dark frames with bright face-like blobs at fixed positions,
//! one blob per present subject. Deterministic, so detector and pipeline
//! tests can assert exact outcomes without camera hardware.

use crate::{CaptureConfig, CaptureError, FrameSource, VideoFrame};
use tracing::debug;

/// Background fill (dim office)
const BACKGROUND: [u8; 3] = [16, 16, 16];

/// Blob fill (skin-toned, bright against the background)
const BLOB: [u8; 3] = [220, 200, 180];

/// Deterministic frame source with configurable subject blobs
pub struct SyntheticSource {
    config: CaptureConfig,
    /// Top-left corner of each subject's blob
    positions: Vec<(u32, u32)>,
    /// Per-subject presence toggle
    present: Vec<bool>,
    /// Blob edge length in pixels
    blob_size: u32,
    sequence: u32,
    /// When set, the next `next_frame` call fails once
    fail_next: Option<CaptureError>,
}

impl SyntheticSource {
    /// Create a source rendering `subjects` blobs spaced evenly left to right
    pub fn new(config: CaptureConfig, subjects: usize) -> Self {
        let blob_size = 80;
        let spacing = config.width / (subjects.max(1) as u32 + 1);
        let y = config.height / 2 - blob_size / 2;
        let positions = (0..subjects as u32)
            .map(|i| (spacing * (i + 1) - blob_size / 2, y))
            .collect();
        debug!(subjects, "synthetic source initialized");
        Self {
            config,
            positions,
            present: vec![true; subjects],
            blob_size,
            sequence: 0,
            fail_next: None,
        }
    }

    /// Toggle a subject's presence in subsequent frames
    pub fn set_present(&mut self, subject: usize, present: bool) {
        if let Some(p) = self.present.get_mut(subject) {
            *p = present;
        }
    }

    /// Make the next capture fail with the given error
    pub fn fail_next(&mut self, err: CaptureError) {
        self.fail_next = Some(err);
    }

    fn render(&self) -> VideoFrame {
        let (w, h) = (self.config.width, self.config.height);
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _ in 0..(w * h) {
            data.extend_from_slice(&BACKGROUND);
        }
        for (i, &(bx, by)) in self.positions.iter().enumerate() {
            if !self.present[i] {
                continue;
            }
            for y in by..(by + self.blob_size).min(h) {
                for x in bx..(bx + self.blob_size).min(w) {
                    let idx = ((y * w + x) * 3) as usize;
                    data[idx..idx + 3].copy_from_slice(&BLOB);
                }
            }
        }
        // Nominal frame period for a synthetic clock
        let period_ns = 1_000_000_000u64 / self.config.fps.max(1) as u64;
        VideoFrame::new(data, w, h, self.sequence as u64 * period_ns, self.sequence)
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Result<VideoFrame, CaptureError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        let frame = self.render();
        self.sequence += 1;
        Ok(frame)
    }

    fn restart(&mut self) -> Result<(), CaptureError> {
        self.sequence = 0;
        self.fail_next = None;
        Ok(())
    }
}
