//! Per-subject activity tracker

use crate::{
    ActivityState, DwellAccumulator, DwellTimes, SignalSmoother, SmootherConfig, TrackError,
};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Point-in-time view of one subject
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    /// Current debounced state
    pub state: ActivityState,
    /// Seconds spent in the current state so far
    pub in_state_secs: f64,
    /// Accumulated time per state
    pub dwell: DwellTimes,
}

/// The unit of per-subject state: one smoother feeding one accumulator.
///
/// Exclusively owned by its roster slot; all calls happen on the single
/// tick-processing path.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    smoother: SignalSmoother,
    accumulator: DwellAccumulator,
}

impl ActivityTracker {
    pub fn new(config: SmootherConfig) -> Result<Self, TrackError> {
        Ok(Self {
            smoother: SignalSmoother::new(config)?,
            accumulator: DwellAccumulator::new(),
        })
    }

    /// Consume one raw observation and return the debounced current state.
    pub fn observe(&mut self, raw: ActivityState, now: Instant) -> Result<ActivityState, TrackError> {
        self.smoother.push(raw);
        let smoothed = self.smoother.smoothed();
        if self.accumulator.current_state() != Some(smoothed) {
            debug!(from = ?self.accumulator.current_state(), to = %smoothed, "state transition");
        }
        self.accumulator.record(smoothed, now)?;
        Ok(smoothed)
    }

    /// Current debounced state, `Idle` before the first observation
    pub fn current_state(&self) -> ActivityState {
        self.accumulator.current_state().unwrap_or_default()
    }

    /// Point-in-time view for the presentation layer.
    pub fn snapshot(&self, now: Instant, include_in_progress: bool) -> TrackerSnapshot {
        let in_state = match self.accumulator.state_changed_at() {
            Some(changed_at) => now
                .checked_duration_since(changed_at)
                .unwrap_or(Duration::ZERO),
            None => Duration::ZERO,
        };
        TrackerSnapshot {
            state: self.current_state(),
            in_state_secs: in_state.as_secs_f64(),
            dwell: self.accumulator.snapshot(now, include_in_progress),
        }
    }

    /// Discard all history, as if newly constructed.
    ///
    /// Invoked on camera restart: stale pre-gap history must not influence
    /// post-gap smoothing or be charged to any state.
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.accumulator.reset();
    }
}
