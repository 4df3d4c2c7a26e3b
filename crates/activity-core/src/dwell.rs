//! Dwell-time accounting
//!
//! Turns a stream of (state, timestamp) observations into cumulative
//! per-state durations. Intervals are measured from the timestamps
//! themselves, never from an assumed tick period, so irregular sampling
//! cadences account correctly. Timestamps must be monotonic; a regression
//! is rejected rather than clamped.

use crate::{ActivityState, TrackError};
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

/// Accumulated duration per activity state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DwellTimes {
    totals: [Duration; ActivityState::ALL.len()],
}

impl DwellTimes {
    /// Accumulated time in the given state
    pub fn get(&self, state: ActivityState) -> Duration {
        self.totals[state.index()]
    }

    pub(crate) fn add(&mut self, state: ActivityState, elapsed: Duration) {
        self.totals[state.index()] += elapsed;
    }

    /// Sum over all states
    pub fn total(&self) -> Duration {
        self.totals.iter().sum()
    }

    /// (state, accumulated) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (ActivityState, Duration)> + '_ {
        ActivityState::ALL
            .iter()
            .map(move |&state| (state, self.get(state)))
    }
}

// Serialized as {"WORKING": 12.5, ...} in float seconds for the dashboard
impl Serialize for DwellTimes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(ActivityState::ALL.len()))?;
        for (state, duration) in self.iter() {
            map.serialize_entry(state.label(), &duration.as_secs_f64())?;
        }
        map.end()
    }
}

/// Per-subject dwell-time accumulator.
///
/// Each `record` charges the interval since the previous observation to
/// the state that was current during that interval, then switches state
/// if the observation differs.
#[derive(Debug, Clone)]
pub struct DwellAccumulator {
    current: Option<Current>,
    dwell: DwellTimes,
}

#[derive(Debug, Clone, Copy)]
struct Current {
    state: ActivityState,
    state_changed_at: Instant,
    last_observed_at: Instant,
}

impl DwellAccumulator {
    pub fn new() -> Self {
        Self {
            current: None,
            dwell: DwellTimes::default(),
        }
    }

    /// Record one observation.
    ///
    /// `now` earlier than the previous observation is a fatal precondition
    /// violation ([`TrackError::ClockRegression`]); nothing is mutated in
    /// that case.
    pub fn record(&mut self, new_state: ActivityState, now: Instant) -> Result<(), TrackError> {
        let Some(current) = self.current.as_mut() else {
            self.current = Some(Current {
                state: new_state,
                state_changed_at: now,
                last_observed_at: now,
            });
            return Ok(());
        };

        let elapsed = now
            .checked_duration_since(current.last_observed_at)
            .ok_or_else(|| TrackError::ClockRegression {
                regressed_by: current.last_observed_at.duration_since(now),
            })?;

        // The just-elapsed interval belongs to the outgoing state
        self.dwell.add(current.state, elapsed);
        if new_state != current.state {
            current.state = new_state;
            current.state_changed_at = now;
        }
        current.last_observed_at = now;
        Ok(())
    }

    /// Copy of the accumulated durations.
    ///
    /// With `include_in_progress`, the interval since the last observation
    /// is added to the current state's entry in the returned copy only, so
    /// UI polls between ticks see live totals without double counting.
    pub fn snapshot(&self, now: Instant, include_in_progress: bool) -> DwellTimes {
        let mut dwell = self.dwell.clone();
        if include_in_progress {
            if let Some(current) = &self.current {
                if let Some(in_progress) = now.checked_duration_since(current.last_observed_at) {
                    dwell.add(current.state, in_progress);
                }
            }
        }
        dwell
    }

    /// State active during the interval currently being accumulated
    pub fn current_state(&self) -> Option<ActivityState> {
        self.current.map(|c| c.state)
    }

    /// When the current state was entered
    pub fn state_changed_at(&self) -> Option<Instant> {
        self.current.map(|c| c.state_changed_at)
    }

    /// Timestamp of the most recent observation
    pub fn last_observed_at(&self) -> Option<Instant> {
        self.current.map(|c| c.last_observed_at)
    }

    /// Forget all history, as if freshly constructed
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DwellAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use ActivityState::{Idle, Working};

    fn t0() -> Instant {
        Instant::now()
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_first_observation_accumulates_nothing() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();
        assert_eq!(acc.current_state(), Some(Working));
        assert_eq!(acc.snapshot(base, false).total(), Duration::ZERO);
    }

    #[test]
    fn test_interval_charged_to_outgoing_state() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();
        acc.record(Working, base + secs(5)).unwrap();
        acc.record(Idle, base + secs(8)).unwrap();
        acc.record(Idle, base + secs(12)).unwrap();

        let dwell = acc.snapshot(base + secs(12), false);
        assert_eq!(dwell.get(Working), secs(8));
        assert_eq!(dwell.get(Idle), secs(4));
    }

    #[test]
    fn test_state_changed_at_tracks_transitions() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();
        acc.record(Working, base + secs(5)).unwrap();
        assert_eq!(acc.state_changed_at(), Some(base));
        acc.record(Idle, base + secs(8)).unwrap();
        assert_eq!(acc.state_changed_at(), Some(base + secs(8)));
    }

    #[test]
    fn test_conservation_of_elapsed_time() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        let offsets = [0u64, 3, 4, 9, 15, 16, 30];
        let states = [Working, Working, Idle, Working, Idle, Idle, Working];
        for (&offset, &state) in offsets.iter().zip(&states) {
            acc.record(state, base + secs(offset)).unwrap();
        }
        assert_eq!(acc.snapshot(base + secs(30), false).total(), secs(30));
    }

    #[test]
    fn test_clock_regression_rejected_without_mutation() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base + secs(10)).unwrap();
        acc.record(Working, base + secs(20)).unwrap();

        let err = acc.record(Idle, base + secs(15)).unwrap_err();
        assert!(matches!(
            err,
            TrackError::ClockRegression { regressed_by } if regressed_by == secs(5)
        ));
        // Totals and state are untouched by the rejected call
        assert_eq!(acc.current_state(), Some(Working));
        assert_eq!(acc.snapshot(base + secs(20), false).get(Working), secs(10));
    }

    #[test]
    fn test_snapshot_idempotent_without_in_progress() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();
        acc.record(Idle, base + secs(7)).unwrap();

        let now = base + secs(9);
        assert_eq!(acc.snapshot(now, false), acc.snapshot(now, false));
    }

    #[test]
    fn test_in_progress_snapshot_does_not_mutate() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();

        let live = acc.snapshot(base + secs(3), true);
        assert_eq!(live.get(Working), secs(3));

        // The stored totals were not advanced by the live snapshot
        acc.record(Working, base + secs(4)).unwrap();
        assert_eq!(acc.snapshot(base + secs(4), false).get(Working), secs(4));
    }

    proptest! {
        // Sum of dwell entries equals elapsed time between the first and
        // last observation, for any non-decreasing call sequence
        #[test]
        fn prop_conservation_of_elapsed_time(
            deltas in proptest::collection::vec(0u64..5000, 1..40),
            picks in proptest::collection::vec(0usize..4, 1..40),
        ) {
            let mut acc = DwellAccumulator::new();
            let base = t0();
            let mut offset_ms = 0u64;
            let mut first = None;
            for (&delta, &pick) in deltas.iter().zip(picks.iter().cycle()) {
                offset_ms += delta;
                let now = base + Duration::from_millis(offset_ms);
                acc.record(ActivityState::ALL[pick], now).unwrap();
                first.get_or_insert(offset_ms);
            }
            let elapsed = Duration::from_millis(offset_ms - first.unwrap_or(0));
            let now = base + Duration::from_millis(offset_ms);
            prop_assert_eq!(acc.snapshot(now, false).total(), elapsed);
        }
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut acc = DwellAccumulator::new();
        let base = t0();
        acc.record(Working, base).unwrap();
        acc.record(Working, base + secs(5)).unwrap();
        acc.reset();
        assert_eq!(acc.current_state(), None);
        assert_eq!(acc.snapshot(base + secs(5), true).total(), Duration::ZERO);
    }
}
