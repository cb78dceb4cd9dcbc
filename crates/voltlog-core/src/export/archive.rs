//! Zip bundling of a finished export folder.

use std::fs::File;
use std::io::Write;
use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use zip::write::FileOptions;

use crate::{RecorderError, Result};

/// Compress the named files of an export folder into a single zip
/// written at `archive_path`. Entry names keep the folder name as a
/// prefix so the bundle unpacks to the same layout.
///
/// Blocking; callers drive this from `spawn_blocking`.
#[track_caller]
pub(crate) fn archive_folder(folder: &Path, archive_path: &Path, files: &[&Path]) -> Result<()> {
    let prefix = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export".to_string());

    let archive_file = File::create(archive_path)?;
    let mut zip = zip::ZipWriter::new(archive_file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for file in files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| RecorderError::ArchiveFailed {
                reason: format!("file has no name: {}", file.display()),
                location: ErrorLocation::from(Location::caller()),
            })?;

        zip.start_file(format!("{prefix}/{name}"), options)
            .map_err(zip_error)?;
        let contents = std::fs::read(file)?;
        zip.write_all(&contents)?;
    }

    let mut archive_file = zip.finish().map_err(zip_error)?;
    archive_file.flush()?;

    Ok(())
}

#[track_caller]
fn zip_error(e: zip::result::ZipError) -> RecorderError {
    RecorderError::ArchiveFailed {
        reason: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
