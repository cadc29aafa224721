//! Migration error types.

use std::path::PathBuf;

/// Errors produced during migration.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload failed: {0}")]
    Upload(String),
}
