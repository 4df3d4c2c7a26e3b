//! Activity State Tracking
//!
//! Converts the noisy per-frame presence signal into a stable activity
//! classification and accounts how long each tracked subject has spent in
//! each state:
//! - Signal smoothing (thresholded plurality vote with state inertia)
//! - Dwell-time accumulation over irregular sampling intervals
//! - Per-subject tracker composing the two
//! - Roster fanning detections out to positional subject slots
//!
//! The core is synchronous and clock-agnostic: every entry point takes the
//! tick's `Instant`, nothing in here samples a clock or blocks.

pub mod config;
pub mod dwell;
pub mod roster;
pub mod signal;
pub mod smoother;
pub mod state;
pub mod tracker;

pub use config::TrackingConfig;
pub use dwell::{DwellAccumulator, DwellTimes};
pub use roster::Roster;
pub use signal::{PresenceSignal, ScriptedSignal, SignalSource};
pub use smoother::{SignalSmoother, SmootherConfig};
pub use state::ActivityState;
pub use tracker::{ActivityTracker, TrackerSnapshot};

use std::time::Duration;
use thiserror::Error;

/// Tracking error types
#[derive(Error, Debug)]
pub enum TrackError {
    /// Observation timestamp earlier than the previous one. Clamping the
    /// delta would corrupt dwell totals undetectably, so the call is
    /// rejected instead.
    #[error("Clock regression: observation is {regressed_by:?} before the previous one")]
    ClockRegression { regressed_by: Duration },

    /// A state label outside the closed set reached a parse boundary
    #[error("Unknown activity state: {0:?}")]
    UnknownState(String),

    /// Smoothing parameters that cannot hold the window invariants
    #[error("Invalid smoothing config: threshold {threshold} with window {window}")]
    InvalidSmoothing { window: usize, threshold: usize },
}
