//! Signal smoothing
//!
//! Debounces the raw per-tick activity signal with a bounded history
//! window and a thresholded plurality vote. A state is only reported once
//! it has enough votes AND strictly beats every rival; otherwise the
//! previously reported state is retained, so a single misdetection never
//! flips the displayed status.

use crate::{ActivityState, TrackError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Smoothing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// History window capacity (observations)
    pub window: usize,

    /// Votes a state needs within the window before it is reported.
    /// Must be at most `window`; a majority threshold keeps two states
    /// from alternating.
    pub threshold: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        // 5-deep buffer, simple majority
        Self {
            window: 5,
            threshold: 3,
        }
    }
}

impl SmootherConfig {
    /// Window of `window` observations with a majority threshold
    pub fn with_window(window: usize) -> Self {
        Self {
            window,
            threshold: window / 2 + 1,
        }
    }

    /// Reject parameters the window invariants cannot hold.
    ///
    /// A zero-capacity window has nothing to evict against, and a
    /// threshold beyond the window can never be reached, leaving the
    /// smoother stuck on its first report. Both come straight from user
    /// configuration, so they are checked here rather than assumed.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.window == 0 || self.threshold > self.window {
            return Err(TrackError::InvalidSmoothing {
                window: self.window,
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

/// Plurality-vote smoother over a bounded FIFO of raw states
#[derive(Debug, Clone)]
pub struct SignalSmoother {
    config: SmootherConfig,
    window: VecDeque<ActivityState>,
    last_reported: Option<ActivityState>,
}

impl SignalSmoother {
    pub fn new(config: SmootherConfig) -> Result<Self, TrackError> {
        config.validate()?;
        let capacity = config.window;
        Ok(Self {
            config,
            window: VecDeque::with_capacity(capacity),
            last_reported: None,
        })
    }

    /// Append a raw observation, evicting the oldest at capacity
    pub fn push(&mut self, raw: ActivityState) {
        if self.window.len() == self.config.window {
            self.window.pop_front();
        }
        self.window.push_back(raw);
    }

    /// Current debounced state.
    ///
    /// The winner must reach the vote threshold and strictly beat every
    /// rival. Ties and insufficient evidence fall back to the previously
    /// reported state; before anything has been reported, to the most
    /// recently pushed raw value.
    pub fn smoothed(&mut self) -> ActivityState {
        let fallback = self
            .last_reported
            .or_else(|| self.window.back().copied())
            .unwrap_or_default();

        let mut counts = [0usize; ActivityState::ALL.len()];
        for &state in &self.window {
            counts[state.index()] += 1;
        }

        let best = counts.iter().copied().max().unwrap_or(0);
        let contenders = counts.iter().filter(|&&c| c == best).count();

        let reported = if best >= self.config.threshold && contenders == 1 {
            ActivityState::ALL[counts.iter().position(|&c| c == best).unwrap_or(0)]
        } else {
            fallback
        };
        self.last_reported = Some(reported);
        reported
    }

    /// Number of buffered observations
    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Drop all history, as if freshly constructed
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_reported = None;
    }
}
