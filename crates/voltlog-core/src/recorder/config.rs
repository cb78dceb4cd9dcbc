//! Recorder tuning knobs.

use std::path::PathBuf;
use std::time::Duration;

/// Maximum buffered raw frames (oldest-arrival-wins: once full, later
/// frames are dropped from storage but still counted as seen).
pub const DEFAULT_RAW_FRAME_CAP: usize = 500_000;

/// Maximum buffered snapshots.
pub const DEFAULT_SNAPSHOT_CAP: usize = 100_000;

/// Cadence of the periodic signal sampler.
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Sliding inactivity horizon; no frame for this long ends the stream.
pub const DEFAULT_INACTIVITY_TIMEOUT: Duration = Duration::from_secs(2);

/// Construction-time configuration for a [`crate::Recorder`].
///
/// Caps and timings are configurable so tests can run with small
/// buffers; production callers normally take the defaults and only set
/// `export_root`.
#[derive(Debug, Clone)]
pub struct RecorderConfig {
    /// Raw-frame buffer cap.
    pub raw_frame_cap: usize,
    /// Snapshot buffer cap.
    pub snapshot_cap: usize,
    /// Periodic sampler cadence.
    pub sample_interval: Duration,
    /// Inactivity watchdog horizon.
    pub inactivity_timeout: Duration,
    /// Directory under which `export_<stamp>/` folders are created.
    pub export_root: PathBuf,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            raw_frame_cap: DEFAULT_RAW_FRAME_CAP,
            snapshot_cap: DEFAULT_SNAPSHOT_CAP,
            sample_interval: DEFAULT_SAMPLE_INTERVAL,
            inactivity_timeout: DEFAULT_INACTIVITY_TIMEOUT,
            export_root: std::env::temp_dir().join("voltlog"),
        }
    }
}
