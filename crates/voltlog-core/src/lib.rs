//! Voltlog Core Library
//!
//! Recording pipeline for electric vehicle CAN telemetry: accumulates
//! raw bus frames and sampled signal snapshots while a stream is live,
//! detects stream start and death via inactivity timeouts, and exports
//! the result as a CSV, a fixed-width trace file, and a zip bundle.
//!
//! # Example
//!
//! ```no_run
//! use voltlog_core::{Recorder, RecorderConfig, RawFrameEvent, CoreResult};
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let recorder = Recorder::new(RecorderConfig::default());
//!
//!     recorder.on_raw_frame(RawFrameEvent::default()).await;
//!     recorder.on_raw_frame(RawFrameEvent::default()).await;
//!
//!     if let Some(artifacts) = recorder.finalize().await? {
//!         println!("Bundle at {}", artifacts.archive.display());
//!     }
//!     Ok(())
//! }
//! ```

mod error;
mod export;
mod recorder;

pub use {
    error::{RecorderError, Result, Result as CoreResult},
    recorder::{
        BatteryStatus, CSV_COLUMNS, CellStats, ControllerStatus, CurrentLimits,
        DEFAULT_INACTIVITY_TIMEOUT, DEFAULT_RAW_FRAME_CAP, DEFAULT_SAMPLE_INTERVAL,
        DEFAULT_SNAPSHOT_CAP, DecodedSignals, ExportArtifacts, FrameByte, FrameId, MotorStatus,
        RawFrame, RawFrameEvent, Recorder, RecorderConfig, RecorderReadout, RecorderStats,
        RecorderStatus, Snapshot, TripStatus,
    },
};

#[cfg(test)]
mod tests;
