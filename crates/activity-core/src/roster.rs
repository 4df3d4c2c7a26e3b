//! Subject roster
//!
//! Fans one detector invocation's regions out to positional subject
//! trackers. Slot i receives the i-th detection in left-to-right order;
//! slots past the detection count observe the absent signal. Identity is
//! positional only: if the detection count fluctuates, a slot's subject
//! can swap. Stronger continuity would need a matching step against
//! previous-tick positions, which is out of scope here.

use crate::{
    ActivityState, ActivityTracker, PresenceSignal, SignalSource, TrackError, TrackerSnapshot,
    TrackingConfig,
};
use face_detect::FaceBbox;
use std::time::Instant;
use tracing::info;

/// Ordered set of per-subject trackers plus the raw-signal source
pub struct Roster<S: SignalSource = PresenceSignal> {
    trackers: Vec<ActivityTracker>,
    signal: S,
}

impl Roster<PresenceSignal> {
    /// Roster with the production presence mapping
    pub fn new(config: &TrackingConfig) -> Result<Self, TrackError> {
        Self::with_signal(config, PresenceSignal)
    }
}

impl<S: SignalSource> Roster<S> {
    /// Roster with an injected raw-signal source
    pub fn with_signal(config: &TrackingConfig, signal: S) -> Result<Self, TrackError> {
        let trackers = (0..config.slots)
            .map(|_| ActivityTracker::new(config.smoothing.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        info!(slots = config.slots, "roster initialized");
        Ok(Self { trackers, signal })
    }

    /// Process one tick's detections.
    ///
    /// Returns each slot's debounced state in slot order; the result
    /// length always equals the slot count, regardless of how many
    /// detections arrived.
    pub fn update(
        &mut self,
        detections: &[FaceBbox],
        now: Instant,
    ) -> Result<Vec<ActivityState>, TrackError> {
        let mut ordered = detections.to_vec();
        ordered.sort_by_key(FaceBbox::center_x);

        let mut states = Vec::with_capacity(self.trackers.len());
        for (slot, tracker) in self.trackers.iter_mut().enumerate() {
            let raw = self.signal.raw_state(slot, ordered.get(slot));
            states.push(tracker.observe(raw, now)?);
        }
        Ok(states)
    }

    /// Per-slot snapshots for the presentation layer
    pub fn snapshots(&self, now: Instant, include_in_progress: bool) -> Vec<TrackerSnapshot> {
        self.trackers
            .iter()
            .map(|t| t.snapshot(now, include_in_progress))
            .collect()
    }

    /// Number of subject slots
    pub fn slot_count(&self) -> usize {
        self.trackers.len()
    }

    /// Reset every tracker, for a camera restart
    pub fn reset_all(&mut self) {
        info!("resetting all trackers");
        for tracker in &mut self.trackers {
            tracker.reset();
        }
    }
}
