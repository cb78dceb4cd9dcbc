use crate::config::{
    default_inactivity_timeout_ms, default_raw_frame_cap, default_sample_interval_ms,
    default_snapshot_cap,
};

use serde::{Deserialize, Serialize};

/// Recorder buffer caps and timer horizons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Raw-frame buffer cap.
    #[serde(default = "default_raw_frame_cap")]
    pub raw_frame_cap: usize,
    /// Snapshot buffer cap.
    #[serde(default = "default_snapshot_cap")]
    pub snapshot_cap: usize,
    /// Periodic sampler cadence, milliseconds.
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    /// Inactivity watchdog horizon, milliseconds.
    #[serde(default = "default_inactivity_timeout_ms")]
    pub inactivity_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            raw_frame_cap: default_raw_frame_cap(),
            snapshot_cap: default_snapshot_cap(),
            sample_interval_ms: default_sample_interval_ms(),
            inactivity_timeout_ms: default_inactivity_timeout_ms(),
        }
    }
}
