//! Voltlog: EV CAN telemetry recording and export.
//!
//! Feeds a replayed frame/decode stream into the recording pipeline
//! and reports the resulting export artifacts. The live Bluetooth/CAN
//! transport and the UI sit outside this binary; it exercises exactly
//! the surface they consume.

mod config;
mod error;
mod replay;

pub(crate) use error::{AppError, Result as AppResult};

use crate::config::Config;

use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use tracing::{error, info};
use voltlog_core::{Recorder, RecorderStatus};

/// Application entry point.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("voltlog=debug")
        .init();

    if let Err(e) = run().await {
        error!(error = ?e, "Voltlog failed");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let replay_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| AppError::ReplayError {
            reason: "Usage: voltlog <replay.jsonl>".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let config = Config::load()?;
    let recorder = Recorder::new(config.recorder_config()?);

    replay::replay_file(&recorder, &replay_path).await?;
    let readout = replay::settle(&recorder).await?;

    match readout.status {
        RecorderStatus::Ready => {
            if let Some(artifacts) = readout.artifacts {
                info!(
                    frames = readout.stats.frame_count,
                    snapshots = readout.stats.snapshot_count,
                    archive = %artifacts.archive.display(),
                    "Export complete"
                );
            }
        }
        RecorderStatus::Idle => {
            info!("Nothing recorded, no export written");
        }
        status => {
            error!(status = ?status, "Recording ended abnormally");
        }
    }

    Ok(())
}
