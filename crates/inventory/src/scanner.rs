//! File scanning for migration.
//!
//! Recursively walks a root directory and records every regular file with its
//! size in bytes. The walk is best-effort: an entry that cannot be read is
//! skipped and the walk carries on. Only a root that cannot be read at all is
//! reported as an error.

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::types::{FileRecord, Inventory};

/// Scans `root` recursively and returns the inventory of regular files.
pub fn scan(root: &Path) -> Result<Inventory, ScanError> {
    let inventory: Inventory = walk_files(root)?.collect();

    debug!(
        root = %root.display(),
        files = inventory.len(),
        total_bytes = inventory.total_size(),
        "scan complete"
    );

    Ok(inventory)
}

/// Returns a lazy iterator over the regular files under `root`.
///
/// Directories and symbolic links are not yielded and links are not followed.
/// Entries whose metadata cannot be read are skipped. A root that is itself a
/// regular file yields exactly that file.
pub fn walk_files(root: &Path) -> Result<impl Iterator<Item = FileRecord>, ScanError> {
    check_root(root)?;

    let files = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    return None;
                }
                match entry.metadata() {
                    Ok(metadata) => Some(FileRecord {
                        size: metadata.len(),
                        path: entry.into_path(),
                    }),
                    Err(e) => {
                        debug!(path = %entry.path().display(), error = %e, "skipping entry");
                        None
                    }
                }
            }
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                debug!(path = %path, error = %e, "skipping entry");
                None
            }
        });

    Ok(files)
}

/// Fails when the walk cannot even begin.
fn check_root(root: &Path) -> Result<(), ScanError> {
    let root_err = |source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(root).map_err(root_err)?;
    if metadata.is_dir() {
        std::fs::read_dir(root).map_err(root_err)?;
    }
    Ok(())
}
