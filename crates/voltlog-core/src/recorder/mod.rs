mod config;
mod frame;
#[allow(clippy::module_inception)]
mod recorder;
mod signals;
mod snapshot;
mod status;

pub use {
    config::{
        DEFAULT_INACTIVITY_TIMEOUT, DEFAULT_RAW_FRAME_CAP, DEFAULT_SAMPLE_INTERVAL,
        DEFAULT_SNAPSHOT_CAP, RecorderConfig,
    },
    frame::{FrameByte, FrameId, RawFrame, RawFrameEvent},
    recorder::Recorder,
    signals::{
        BatteryStatus, CellStats, ControllerStatus, CurrentLimits, DecodedSignals, MotorStatus,
        TripStatus,
    },
    snapshot::{CSV_COLUMNS, Snapshot},
    status::{ExportArtifacts, RecorderReadout, RecorderStats, RecorderStatus},
};
