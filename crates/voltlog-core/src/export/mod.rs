//! Export artifact production: CSV, trace, and zip bundle.

mod archive;
mod csv;
mod timestamp;
mod trace;

pub(crate) use {
    csv::render_csv,
    timestamp::{file_stamp, locale_timestamp},
    trace::render_trace,
};

use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

use crate::{ExportArtifacts, RecorderError, Result};

/// Name of the snapshot CSV inside an export folder.
const CSV_FILENAME: &str = "data.csv";

/// Name of the raw frame trace inside an export folder.
const TRACE_FILENAME: &str = "data.trc";

/// Prefix of export folder and archive names.
const EXPORT_PREFIX: &str = "export_";

/// Write both serialized buffers under a fresh `export_<stamp>/` folder
/// beneath `root` and bundle the folder into a zip beside it.
///
/// The zip step runs on the blocking pool; the file writes use async IO.
#[instrument(skip(csv, trace))]
pub(crate) async fn write_export(
    root: &Path,
    stamp: &str,
    csv: String,
    trace: String,
) -> Result<ExportArtifacts> {
    let folder = root.join(format!("{EXPORT_PREFIX}{stamp}"));
    let csv_path = folder.join(CSV_FILENAME);
    let trace_path = folder.join(TRACE_FILENAME);
    let archive_path = root.join(format!("{EXPORT_PREFIX}{stamp}.zip"));

    tokio::fs::create_dir_all(&folder).await?;
    tokio::fs::write(&csv_path, csv).await?;
    tokio::fs::write(&trace_path, trace).await?;

    debug!(folder = ?folder, "Export files written, archiving");

    let blocking_folder = folder.clone();
    let blocking_csv = csv_path.clone();
    let blocking_trace = trace_path.clone();
    let blocking_archive = archive_path.clone();
    tokio::task::spawn_blocking(move || {
        archive::archive_folder(
            &blocking_folder,
            &blocking_archive,
            &[&blocking_csv, &blocking_trace],
        )
    })
    .await
    .map_err(|e| RecorderError::ArchiveTaskFailed {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })??;

    info!(archive = ?archive_path, "Export bundle complete");

    Ok(ExportArtifacts {
        folder,
        csv: csv_path,
        trace: trace_path,
        archive: archive_path,
    })
}
