//! Scan error types.

use std::path::PathBuf;

/// Errors that prevent a scan from starting.
///
/// Per-entry failures during the walk are skipped and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read scan root {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
