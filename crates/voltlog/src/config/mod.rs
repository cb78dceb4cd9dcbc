mod export_config;
mod limits_config;
#[allow(clippy::module_inception)]
mod config;

pub(crate) use {config::Config, export_config::ExportConfig, limits_config::LimitsConfig};

pub(crate) fn default_raw_frame_cap() -> usize {
    voltlog_core::DEFAULT_RAW_FRAME_CAP
}

pub(crate) fn default_snapshot_cap() -> usize {
    voltlog_core::DEFAULT_SNAPSHOT_CAP
}

pub(crate) fn default_sample_interval_ms() -> u64 {
    voltlog_core::DEFAULT_SAMPLE_INTERVAL.as_millis() as u64
}

pub(crate) fn default_inactivity_timeout_ms() -> u64 {
    voltlog_core::DEFAULT_INACTIVITY_TIMEOUT.as_millis() as u64
}
