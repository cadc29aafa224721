//! Local side of a transfer: open, close and remove.

use std::fs::File;
use std::io;
use std::path::Path;

/// Filesystem operations the executor performs on each queued file.
pub trait LocalFiles: Send + Sync {
    fn open(&self, path: &Path) -> io::Result<File>;

    /// Releases a handle returned by [`open`](Self::open).
    fn close(&self, file: File) -> io::Result<()>;

    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLocalFiles;

impl LocalFiles for FsLocalFiles {
    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    // Dropping a read-only handle has no error to report.
    fn close(&self, file: File) -> io::Result<()> {
        drop(file);
        Ok(())
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}
