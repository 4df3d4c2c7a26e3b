//! Worktime Monitor - Main Entry Point

use activity_core::Roster;
use face_detect::CascadeDetector;
use frame_source::SyntheticSource;
use monitor::{init_logging, Monitor, MonitorConfig};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Worktime Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args().nth(1) {
        Some(path) => MonitorConfig::load(Path::new(&path))?,
        None => MonitorConfig::default(),
    };
    info!(
        slots = config.tracking.slots,
        frame_interval_ms = config.frame_interval_ms,
        "starting pipeline"
    );

    // Synthetic source stands in for the webcam; a capture backend swaps
    // in behind the FrameSource trait without touching the pipeline.
    let source = SyntheticSource::new(config.capture.clone(), config.tracking.slots);
    let detector = CascadeDetector::new(config.detector.clone());
    let roster = Roster::new(&config.tracking)?;
    let mut monitor = Monitor::new(source, detector, roster, config.restart_after_failures);

    // Two independent cadences, one task: frame ticks feed the roster,
    // display ticks emit a snapshot. Select keeps all roster access on
    // this single path.
    let mut frame_tick = tokio::time::interval(Duration::from_millis(config.frame_interval_ms));
    let mut display_tick =
        tokio::time::interval(Duration::from_millis(config.display_interval_ms));

    loop {
        tokio::select! {
            _ = frame_tick.tick() => {
                monitor.tick(Instant::now())?;
            }
            _ = display_tick.tick() => {
                let snapshot = monitor.snapshot(Instant::now());
                println!("{}", serde_json::to_string(&snapshot)?);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
