//! Recorder status and the readout published to subscribers.

use std::path::PathBuf;

/// Lifecycle state of the recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderStatus {
    /// No stream detected; buffers empty or stale.
    Idle,
    /// First frame seen, awaiting confirmation that the stream is live.
    Arming,
    /// Live stream confirmed; accumulating frames and snapshots.
    Recording,
    /// Export in progress.
    Finalizing,
    /// Export complete; artifact paths available until reset.
    Ready,
    /// Export failed; see the `finalize()` error for the cause.
    Error,
}

/// Buffer statistics exposed to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecorderStats {
    /// Frames currently buffered (capped).
    pub frame_count: usize,
    /// Snapshots currently buffered (capped).
    pub snapshot_count: usize,
    /// Frames observed since the last reset, including dropped ones.
    pub frames_seen: u64,
}

/// Paths of a completed export, held until the next reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifacts {
    /// Folder containing the CSV and trace files.
    pub folder: PathBuf,
    /// Row-sampled signal CSV.
    pub csv: PathBuf,
    /// Fixed-width raw frame trace.
    pub trace: PathBuf,
    /// Zip bundle of the folder; the shareable artifact.
    pub archive: PathBuf,
}

/// Everything a subscriber can observe, published after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecorderReadout {
    /// Current lifecycle state.
    pub status: RecorderStatus,
    /// Current buffer statistics.
    pub stats: RecorderStats,
    /// Last completed export, if any.
    pub artifacts: Option<ExportArtifacts>,
}

impl Default for RecorderReadout {
    fn default() -> Self {
        Self {
            status: RecorderStatus::Idle,
            stats: RecorderStats::default(),
            artifacts: None,
        }
    }
}
