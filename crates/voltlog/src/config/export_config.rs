use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Export destination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for `export_<stamp>` folders. Defaults to the
    /// platform data dir when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}
