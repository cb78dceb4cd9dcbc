use crate::export::{file_stamp, locale_timestamp, render_csv, render_trace};
use crate::{DecodedSignals, RawFrame, Snapshot};

use std::io::Read;

use chrono::{TimeZone, Utc};

fn frame(offset_ms: u64, id: &str, bytes: &[&str]) -> RawFrame {
    RawFrame {
        time_offset_ms: offset_ms,
        id: id.to_string(),
        kind: "Rx".to_string(),
        bytes: bytes.iter().map(|b| (*b).to_string()).collect(),
    }
}

fn snapshot(stamp: &str) -> Snapshot {
    Snapshot::sample(&DecodedSignals::default(), stamp.to_string())
}

/// WHAT: Timestamps render in the fixed zone, 24-hour, second precision
/// WHY: Exports must compare cleanly regardless of device timezone
#[test]
#[allow(clippy::unwrap_used)]
fn given_utc_instant_when_formatted_then_fixed_locale_form() {
    let at = Utc.with_ymd_and_hms(2026, 2, 1, 12, 5, 9).single().unwrap();

    assert_eq!(locale_timestamp(at), "01/02/2026, 13:05:09");
    assert_eq!(file_stamp(at), "01-02-2026_13-05-09");
}

/// WHAT: The trace file carries two header lines plus one line per frame
/// WHY: Consumers skip a fixed two-line preamble before parsing data
#[test]
fn given_frames_when_traced_then_header_plus_one_line_each() {
    let frames = vec![frame(0, "1A2", &["01"]), frame(1500, "7FF", &["0A", "FF"])];

    let rendered = render_trace(&frames);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with(';'));
    assert!(lines[1].starts_with(';'));
}

/// WHAT: Identifiers are zero-padded to 8 hex chars at export time
/// WHY: A frame with no id must still serialize as "00000000"
#[test]
fn given_missing_id_when_traced_then_padded_to_eight_zeros() {
    let rendered = render_trace(&[frame(0, "", &[])]);
    let line = rendered.lines().nth(2).unwrap_or("");

    assert!(line.contains("00000000"));
}

/// WHAT: An empty payload serializes DLC as " 0" and offset as seconds
/// WHY: Columns are fixed-width; DLC is left-padded to width 2
#[test]
fn given_empty_payload_when_traced_then_fixed_width_columns() {
    let rendered = render_trace(&[frame(2500, "12345678", &[])]);
    let line = rendered.lines().nth(2).unwrap_or("");

    assert!(line.starts_with("     1 2.500    Rx  12345678  0"));
}

/// WHAT: Byte pairs join with single spaces in arrival order
/// WHY: The data column is the payload bytes, space-separated
#[test]
fn given_payload_when_traced_then_space_joined_pairs() {
    let rendered = render_trace(&[frame(0, "1A2", &["0A", "00", "FF"])]);
    let line = rendered.lines().nth(2).unwrap_or("");

    assert!(line.contains("0A 00 FF"));
}

/// WHAT: CSV output has a header plus exactly one row per snapshot
/// WHY: N snapshots must round-trip to N+1 lines in declared field order
#[test]
fn given_snapshots_when_rendered_then_header_plus_n_rows() {
    let snapshots = vec![
        snapshot("27/08/2026, 14:03:55"),
        snapshot("27/08/2026, 14:03:56"),
        snapshot("27/08/2026, 14:03:57"),
    ];

    let rendered = render_csv(&snapshots);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Timestamp,SOC (%)"));
    assert!(lines[0].ends_with("Faults"));
}

/// WHAT: Fields containing the delimiter are double-quoted
/// WHY: The locale timestamp contains a comma and must survive parsing
#[test]
fn given_comma_bearing_timestamp_when_rendered_then_quoted() {
    let rendered = render_csv(&[snapshot("27/08/2026, 14:03:55")]);
    let row = rendered.lines().nth(1).unwrap_or("");

    assert!(row.starts_with("\"27/08/2026, 14:03:55\","));
}

/// WHAT: write_export produces folder, CSV, trace, and zip on disk
/// WHY: The archive is the shareable artifact and must bundle both files
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_serialized_buffers_when_written_then_all_artifacts_exist() {
    let root = tempfile::tempdir().unwrap();

    let artifacts = crate::export::write_export(
        root.path(),
        "01-02-2026_13-05-09",
        "Timestamp\n".to_string(),
        ";\n;\n".to_string(),
    )
    .await
    .unwrap();

    assert!(artifacts.folder.is_dir());
    assert!(artifacts.csv.is_file());
    assert!(artifacts.trace.is_file());
    assert!(artifacts.archive.is_file());
    assert!(
        artifacts
            .folder
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("export_")
    );

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&artifacts.archive).unwrap())
        .unwrap();
    assert_eq!(archive.len(), 2);

    let mut csv = String::new();
    archive
        .by_name("export_01-02-2026_13-05-09/data.csv")
        .unwrap()
        .read_to_string(&mut csv)
        .unwrap();
    assert_eq!(csv, "Timestamp\n");
}
