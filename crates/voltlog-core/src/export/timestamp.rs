//! Export timestamp formatting.
//!
//! All timestamps are rendered in one fixed regional zone and format so
//! that exports compare cleanly regardless of where the device roams.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Fixed export zone: UTC+01:00.
const EXPORT_UTC_OFFSET_SECS: i32 = 3600;

/// 24-hour, second-precision, en-GB style.
const LOCALE_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

fn export_zone() -> FixedOffset {
    FixedOffset::east_opt(EXPORT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Render a wall-clock instant the way it appears inside CSV rows.
pub(crate) fn locale_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&export_zone())
        .format(LOCALE_FORMAT)
        .to_string()
}

/// Render a wall-clock instant with filesystem-safe separators, for
/// naming the export folder and archive.
pub(crate) fn file_stamp(at: DateTime<Utc>) -> String {
    locale_timestamp(at)
        .replace(", ", "_")
        .replace(['/', ':'], "-")
}
