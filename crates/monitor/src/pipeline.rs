//! Tick pipeline
//!
//! One `tick` per video frame: pull → detect → roster update. Capture and
//! detection failures are not errors for the tracking core; they become
//! absent observations so smoothing and dwell accounting stay monotonic
//! through outages. Persistent capture failure triggers a source restart
//! and a tracker reset, since pre-gap history must not leak past the gap.

use crate::snapshot::DashboardSnapshot;
use activity_core::{ActivityState, Roster, SignalSource, TrackError};
use face_detect::{FaceBbox, FaceDetect};
use frame_source::FrameSource;
use std::time::Instant;
use tracing::{info, warn};

/// Frame source + detector + roster, driven by an external ticker
pub struct Monitor<F: FrameSource, D: FaceDetect, S: SignalSource> {
    source: F,
    detector: D,
    roster: Roster<S>,
    restart_after_failures: u32,
    consecutive_failures: u32,
}

impl<F: FrameSource, D: FaceDetect, S: SignalSource> Monitor<F, D, S> {
    pub fn new(source: F, detector: D, roster: Roster<S>, restart_after_failures: u32) -> Self {
        Self {
            source,
            detector,
            roster,
            restart_after_failures,
            consecutive_failures: 0,
        }
    }

    /// Process one video tick at `now`.
    pub fn tick(&mut self, now: Instant) -> Result<Vec<ActivityState>, TrackError> {
        let detections = self.acquire();
        self.roster.update(&detections, now)
    }

    /// Dashboard view with live (in-progress) dwell totals
    pub fn snapshot(&self, now: Instant) -> DashboardSnapshot {
        DashboardSnapshot::from_trackers(self.roster.snapshots(now, true))
    }

    fn acquire(&mut self) -> Vec<FaceBbox> {
        let frame = match self.source.next_frame() {
            Ok(frame) => frame,
            Err(err) => {
                warn!(%err, "frame capture failed, observing absence");
                self.consecutive_failures += 1;
                if self.consecutive_failures >= self.restart_after_failures {
                    self.restart();
                }
                return Vec::new();
            }
        };
        self.consecutive_failures = 0;

        match self.detector.detect(&frame) {
            Ok(detection) => detection.regions,
            Err(err) => {
                warn!(%err, "detector unavailable, observing absence");
                Vec::new()
            }
        }
    }

    fn restart(&mut self) {
        info!(
            failures = self.consecutive_failures,
            "restarting frame source"
        );
        match self.source.restart() {
            Ok(()) => {
                self.consecutive_failures = 0;
                // History from before the gap must not influence
                // post-restart smoothing or be charged to any state
                self.roster.reset_all();
            }
            Err(err) => warn!(%err, "frame source restart failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_core::{PresenceSignal, SmootherConfig, TrackingConfig};
    use face_detect::{CascadeConfig, CascadeDetector, Detection, ScriptedDetector};
    use frame_source::{CaptureConfig, CaptureError, SyntheticSource};
    use std::time::Duration;
    use ActivityState::{Idle, Working};

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn responsive(slots: usize) -> TrackingConfig {
        TrackingConfig {
            slots,
            smoothing: SmootherConfig::with_window(1),
        }
    }

    fn monitor_with_subjects(
        subjects: usize,
        slots: usize,
    ) -> Monitor<SyntheticSource, CascadeDetector, PresenceSignal> {
        let source = SyntheticSource::new(CaptureConfig::office(), subjects);
        let detector = CascadeDetector::new(CascadeConfig::default());
        let roster = Roster::new(&responsive(slots)).unwrap();
        Monitor::new(source, detector, roster, 3)
    }

    #[test]
    fn test_end_to_end_presence_becomes_working() {
        let mut monitor = monitor_with_subjects(2, 2);
        let base = Instant::now();
        let states = monitor.tick(base).unwrap();
        assert_eq!(states, vec![Working, Working]);
    }

    #[test]
    fn test_capture_failure_observes_absence() {
        let mut monitor = monitor_with_subjects(1, 1);
        let base = Instant::now();
        monitor.tick(base).unwrap();
        monitor.source.fail_next(CaptureError::Timeout);
        let states = monitor.tick(base + secs(1)).unwrap();
        assert_eq!(states, vec![Idle]);
    }

    struct FailingDetector;

    impl FaceDetect for FailingDetector {
        fn detect(
            &self,
            _frame: &frame_source::VideoFrame,
        ) -> Result<Detection, face_detect::DetectError> {
            Err(face_detect::DetectError::EmptyFrame)
        }
    }

    #[test]
    fn test_detect_failure_observes_absence() {
        let source = SyntheticSource::new(CaptureConfig::office(), 1);
        let roster = Roster::new(&responsive(1)).unwrap();
        let mut monitor = Monitor::new(source, FailingDetector, roster, 3);
        let states = monitor.tick(Instant::now()).unwrap();
        assert_eq!(states, vec![Idle]);
    }

    #[test]
    fn test_no_faces_observes_absence() {
        let source = SyntheticSource::new(CaptureConfig::office(), 1);
        let detector = ScriptedDetector::new(vec![Detection::none()]);
        let roster = Roster::new(&responsive(1)).unwrap();
        let mut monitor = Monitor::new(source, detector, roster, 3);
        let states = monitor.tick(Instant::now()).unwrap();
        assert_eq!(states, vec![Idle]);
    }

    #[test]
    fn test_persistent_failure_restarts_and_resets() {
        let mut monitor = monitor_with_subjects(1, 1);
        let base = Instant::now();
        monitor.tick(base).unwrap();
        monitor.tick(base + secs(5)).unwrap();
        assert!(monitor.snapshot(base + secs(5)).subjects[0].dwell.get(Working) > Duration::ZERO);

        for i in 0..3 {
            monitor.source.fail_next(CaptureError::Timeout);
            monitor.tick(base + secs(6 + i)).unwrap();
        }
        // Restart wiped dwell history; the last failing tick at t=8 is the
        // fresh accumulator's first observation
        let snapshot = monitor.snapshot(base + secs(8));
        assert_eq!(snapshot.subjects[0].dwell.total(), Duration::ZERO);
        assert_eq!(snapshot.subjects[0].state, Idle);
    }

    #[test]
    fn test_snapshot_has_one_row_per_slot() {
        let mut monitor = monitor_with_subjects(1, 3);
        let base = Instant::now();
        monitor.tick(base).unwrap();
        let snapshot = monitor.snapshot(base);
        assert_eq!(snapshot.subjects.len(), 3);
        assert_eq!(snapshot.subjects[0].state, Working);
        assert_eq!(snapshot.subjects[1].state, Idle);
        assert_eq!(snapshot.subjects[2].state, Idle);
    }
}
