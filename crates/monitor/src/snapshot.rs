//! Dashboard snapshot types
//!
//! Plain data only: the core never says how anything is to be displayed,
//! the presentation layer owns colors, icons, and layout.

use activity_core::{ActivityState, DwellTimes, TrackerSnapshot};
use serde::Serialize;

/// One subject's row on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStatus {
    /// Roster slot index
    pub slot: usize,
    /// Current debounced state
    pub state: ActivityState,
    /// Seconds in the current state
    pub in_state_secs: f64,
    /// Accumulated seconds per state
    pub dwell: DwellTimes,
}

/// Everything the presentation layer needs for one refresh
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub subjects: Vec<SubjectStatus>,
}

impl DashboardSnapshot {
    pub fn from_trackers(snapshots: Vec<TrackerSnapshot>) -> Self {
        let subjects = snapshots
            .into_iter()
            .enumerate()
            .map(|(slot, s)| SubjectStatus {
                slot,
                state: s.state,
                in_state_secs: s.in_state_secs,
                dwell: s.dwell,
            })
            .collect();
        Self { subjects }
    }
}

/// Dwell string the way the dashboard shows it: "42s" under a minute,
/// "3m 12s" from there on.
pub fn format_dwell(secs: f64) -> String {
    let t = secs as u64;
    if t >= 60 {
        format!("{}m {}s", t / 60, t % 60)
    } else {
        format!("{t}s")
    }
}
