//! JSONL replay source standing in for the live transport layer.
//!
//! One externally tagged event per line: `{"frame": {...}}` pushes a
//! raw frame, `{"decoded": {...}}` replaces the decoded signal state,
//! `{"wait": {"ms": N}}` pauses between events to reproduce stream
//! timing. Blank lines and `#` comments are skipped; malformed lines
//! are logged and skipped, never fatal.

use crate::{AppError, AppResult};

use std::{panic::Location, path::Path};

use error_location::ErrorLocation;
use serde::Deserialize;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};
use voltlog_core::{DecodedSignals, RawFrameEvent, Recorder, RecorderReadout, RecorderStatus};

/// One line of a replay log.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayEvent {
    /// A raw frame arrival.
    Frame(RawFrameEvent),
    /// A decoded-signal update.
    Decoded(DecodedSignals),
    /// A pause before the next event.
    Wait {
        /// Pause length in milliseconds.
        ms: u64,
    },
}

/// Parse one replay line. Returns `None` for blanks, comments, and
/// malformed lines (which are logged, not raised).
pub fn parse_line(line: &str) -> Option<ReplayEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    match serde_json::from_str(trimmed) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(error = %e, "Skipping malformed replay line");
            None
        }
    }
}

/// Feed a replay log into the recorder, event by event.
#[instrument(skip(recorder))]
pub async fn replay_file(recorder: &Recorder, path: &Path) -> AppResult<()> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::ReplayError {
            reason: format!("Failed to read {}: {}", path.display(), e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let mut fed = 0usize;
    for line in contents.lines() {
        match parse_line(line) {
            Some(ReplayEvent::Frame(event)) => {
                recorder.on_raw_frame(event).await;
                fed += 1;
            }
            Some(ReplayEvent::Decoded(decoded)) => {
                recorder.update_decoded(decoded).await;
            }
            Some(ReplayEvent::Wait { ms }) => {
                sleep(Duration::from_millis(ms)).await;
            }
            None => {}
        }
    }

    info!(frames = fed, "Replay stream ended");

    Ok(())
}

/// Wait for the recorder to settle after the stream ends.
///
/// If the inactivity watchdog has not already ended the session, a
/// manual finalize is requested; either way this returns once the
/// recorder reaches `Idle`, `Ready`, or `Error`.
#[instrument(skip(recorder))]
pub async fn settle(recorder: &Recorder) -> AppResult<RecorderReadout> {
    let mut rx = recorder.subscribe();

    if matches!(
        recorder.status().await,
        RecorderStatus::Arming | RecorderStatus::Recording
    ) {
        debug!("Stream still live, requesting finalize");
        recorder.finalize().await?;
    }

    let readout = rx
        .wait_for(|r| {
            matches!(
                r.status,
                RecorderStatus::Idle | RecorderStatus::Ready | RecorderStatus::Error
            )
        })
        .await
        .map_err(|e| AppError::ReplayError {
            reason: format!("Recorder readout channel closed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?
        .clone();

    Ok(readout)
}
