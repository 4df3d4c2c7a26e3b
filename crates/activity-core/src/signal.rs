//! Raw-signal derivation
//!
//! How a detection (or its absence) becomes a raw [`ActivityState`] is an
//! injectable seam, so the production presence mapping and simulated
//! signal generators are interchangeable without touching the trackers.

use crate::ActivityState;
use face_detect::FaceBbox;

/// Derives one raw state per slot per tick.
pub trait SignalSource {
    /// Raw state for a slot, given its assigned detection for this tick
    /// (`None` when no detection reached the slot).
    fn raw_state(&mut self, slot: usize, detection: Option<&FaceBbox>) -> ActivityState;
}

/// Production mapping: a visible face means the subject is at their desk
/// working; absence of evidence reads as idle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceSignal;

impl SignalSource for PresenceSignal {
    fn raw_state(&mut self, _slot: usize, detection: Option<&FaceBbox>) -> ActivityState {
        match detection {
            Some(_) => ActivityState::Working,
            None => ActivityState::Idle,
        }
    }
}

/// Replays a fixed per-slot state sequence, repeating the last entry once
/// exhausted. Detections are ignored; this is the deterministic stand-in
/// for simulated sleep/walk streams in tests and demos.
#[derive(Debug, Clone)]
pub struct ScriptedSignal {
    scripts: Vec<Vec<ActivityState>>,
    cursors: Vec<usize>,
}

impl ScriptedSignal {
    /// One script per slot
    pub fn new(scripts: Vec<Vec<ActivityState>>) -> Self {
        let cursors = vec![0; scripts.len()];
        Self { scripts, cursors }
    }
}

impl SignalSource for ScriptedSignal {
    fn raw_state(&mut self, slot: usize, _detection: Option<&FaceBbox>) -> ActivityState {
        let Some(script) = self.scripts.get(slot) else {
            return ActivityState::default();
        };
        if script.is_empty() {
            return ActivityState::default();
        }
        let i = self.cursors[slot].min(script.len() - 1);
        self.cursors[slot] = i + 1;
        script[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ActivityState::{Idle, Sleeping, Walking, Working};

    #[test]
    fn test_presence_maps_detection_to_working() {
        let mut signal = PresenceSignal;
        let bbox = FaceBbox::new(0, 0, 60, 60);
        assert_eq!(signal.raw_state(0, Some(&bbox)), Working);
        assert_eq!(signal.raw_state(0, None), Idle);
    }

    #[test]
    fn test_scripted_replays_per_slot() {
        let mut signal = ScriptedSignal::new(vec![
            vec![Working, Sleeping],
            vec![Walking],
        ]);
        assert_eq!(signal.raw_state(0, None), Working);
        assert_eq!(signal.raw_state(1, None), Walking);
        assert_eq!(signal.raw_state(0, None), Sleeping);
        // Exhausted scripts repeat their last entry
        assert_eq!(signal.raw_state(0, None), Sleeping);
        assert_eq!(signal.raw_state(1, None), Walking);
        // Slots without a script read as idle
        assert_eq!(signal.raw_state(9, None), Idle);
    }
}
