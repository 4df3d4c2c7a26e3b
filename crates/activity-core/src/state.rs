//! Activity state enum

use crate::TrackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subject activity classification.
///
/// The set is closed; the dashboard legend enumerates exactly these four.
/// The absent signal (no face visible, or detector unavailable) maps to
/// `Idle`, which is why it is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityState {
    Working,
    #[default]
    Idle,
    Sleeping,
    Walking,
}

impl ActivityState {
    /// All states in display order
    pub const ALL: [ActivityState; 4] = [
        ActivityState::Working,
        ActivityState::Idle,
        ActivityState::Sleeping,
        ActivityState::Walking,
    ];

    /// Dense index for per-state arrays
    pub(crate) fn index(self) -> usize {
        match self {
            ActivityState::Working => 0,
            ActivityState::Idle => 1,
            ActivityState::Sleeping => 2,
            ActivityState::Walking => 3,
        }
    }

    /// Dashboard label
    pub fn label(self) -> &'static str {
        match self {
            ActivityState::Working => "WORKING",
            ActivityState::Idle => "IDLE",
            ActivityState::Sleeping => "SLEEPING",
            ActivityState::Walking => "WALKING",
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ActivityState {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORKING" => Ok(ActivityState::Working),
            "IDLE" => Ok(ActivityState::Idle),
            "SLEEPING" => Ok(ActivityState::Sleeping),
            "WALKING" => Ok(ActivityState::Walking),
            other => Err(TrackError::UnknownState(other.to_string())),
        }
    }
}
