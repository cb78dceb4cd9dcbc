use error_location::ErrorLocation;
use thiserror::Error;

/// Export pipeline errors with source location tracking.
///
/// Only `finalize()` can fail; ingestion, sampling, and reset are
/// infallible. Malformed input and capacity exhaustion are handled
/// silently and never appear here.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Filesystem operation failed during export.
    #[error("Export I/O failed: {source} {location}")]
    ExportIo {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Zip archiving of the export folder failed.
    #[error("Archiving failed: {reason} {location}")]
    ArchiveFailed {
        /// Description of the zip failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The blocking archive task could not be joined.
    #[error("Archive task failed: {reason} {location}")]
    ArchiveTaskFailed {
        /// Description of the join failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::ExportIo {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
