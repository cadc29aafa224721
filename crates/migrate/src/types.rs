//! Data types for the migration flow.

use multipixr_inventory::FileRecord;

/// Descriptor of an object created by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub id: String,
    pub name: String,
    pub size: Option<u64>,
}

/// Terminal state of one queued file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Uploaded, closed and deleted locally.
    Uploaded { remote: RemoteObject },
    /// Upload failed; the local file is untouched.
    UploadFailed { error: String },
    /// Uploaded, but the handle did not close cleanly; the local file is kept.
    LocalCloseFailed { remote: RemoteObject, error: String },
    /// Uploaded and closed, but deletion failed; both copies exist.
    LocalDeleteFailed { remote: RemoteObject, error: String },
}

impl TransferOutcome {
    /// True if a remote copy now exists.
    pub fn reached_remote(&self) -> bool {
        !matches!(self, TransferOutcome::UploadFailed { .. })
    }

    /// True if the local file was removed.
    pub fn deleted_local(&self) -> bool {
        matches!(self, TransferOutcome::Uploaded { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TransferOutcome::Uploaded { .. } => None,
            TransferOutcome::UploadFailed { error }
            | TransferOutcome::LocalCloseFailed { error, .. }
            | TransferOutcome::LocalDeleteFailed { error, .. } => Some(error),
        }
    }
}

/// Per-file outcomes of a run, in queue order.
#[derive(Debug, Clone, Default)]
pub struct MigrationReport {
    entries: Vec<(FileRecord, TransferOutcome)>,
}

impl MigrationReport {
    pub fn push(&mut self, record: FileRecord, outcome: TransferOutcome) {
        self.entries.push((record, outcome));
    }

    pub fn entries(&self) -> &[(FileRecord, TransferOutcome)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Files whose upload succeeded, whether or not they were deleted.
    pub fn uploaded(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.reached_remote()).count()
    }

    pub fn deleted(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.deleted_local()).count()
    }

    /// Files with any per-file failure.
    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.error().is_some()).count()
    }

    /// Bytes that reached remote storage.
    pub fn bytes_uploaded(&self) -> u64 {
        self.entries
            .iter()
            .filter(|(_, o)| o.reached_remote())
            .map(|(r, _)| r.size)
            .sum()
    }
}
