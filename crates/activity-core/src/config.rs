//! Tracking configuration

use crate::SmootherConfig;
use serde::{Deserialize, Serialize};

/// Roster-wide tracking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Number of tracked subject slots
    pub slots: usize,

    /// Smoothing applied to every slot
    pub smoothing: SmootherConfig,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            slots: 1,
            smoothing: SmootherConfig::default(),
        }
    }
}

impl TrackingConfig {
    /// Config for `slots` subjects with default smoothing
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots,
            ..Default::default()
        }
    }

    /// Slow to change state: wide window, strong majority. Suits noisy
    /// camera placements where misdetections come in bursts.
    pub fn steady(slots: usize) -> Self {
        Self {
            slots,
            smoothing: SmootherConfig {
                window: 10,
                threshold: 7,
            },
        }
    }

    /// Quick to change state: short window, simple majority
    pub fn responsive(slots: usize) -> Self {
        Self {
            slots,
            smoothing: SmootherConfig {
                window: 3,
                threshold: 2,
            },
        }
    }
}
