//! Worktime Monitor
//!
//! Composition root for the dashboard backend: pulls frames, runs face
//! detection, feeds the activity roster, and emits plain-data snapshots
//! for whatever presentation layer is attached.

pub mod pipeline;
pub mod snapshot;

pub use pipeline::Monitor;
pub use snapshot::{format_dwell, DashboardSnapshot, SubjectStatus};

use activity_core::TrackingConfig;
use face_detect::CascadeConfig;
use frame_source::CaptureConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Top-level monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Frame acquisition settings
    pub capture: CaptureConfig,

    /// Face detector tuning
    pub detector: CascadeConfig,

    /// Roster and smoothing settings
    pub tracking: TrackingConfig,

    /// Video tick period (milliseconds)
    pub frame_interval_ms: u64,

    /// Dashboard refresh period (milliseconds)
    pub display_interval_ms: u64,

    /// Consecutive capture failures before the source is restarted and
    /// all trackers reset
    pub restart_after_failures: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::office(),
            detector: CascadeConfig::default(),
            tracking: TrackingConfig::default(),
            frame_interval_ms: 30,
            display_interval_ms: 1000,
            restart_after_failures: 30,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from a JSON file.
    ///
    /// Smoothing parameters are checked here so a bad file is rejected at
    /// startup rather than surfacing as roster construction failures.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.tracking.smoothing.validate()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Initialize the tracing subscriber
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
