//! Sequential transfer executor.
//!
//! Processes an [`OrderedQueue`] one file at a time. Each file is uploaded,
//! its handle closed, and only then is the local copy removed.

use tracing::{debug, info, warn};

use multipixr_inventory::{FileRecord, OrderedQueue};

use crate::error::MigrateError;
use crate::local::LocalFiles;
use crate::types::{MigrationReport, TransferOutcome};
use crate::uploader::Uploader;

/// Drives the per-file pipeline over a queue.
pub struct TransferExecutor<'a> {
    uploader: &'a dyn Uploader,
    local: &'a dyn LocalFiles,
}

impl<'a> TransferExecutor<'a> {
    pub fn new(uploader: &'a dyn Uploader, local: &'a dyn LocalFiles) -> Self {
        Self { uploader, local }
    }

    /// Transfers every queued file in order.
    ///
    /// Upload, close and delete failures are recorded and the run continues.
    /// A file that cannot be opened halts the run; files after it are not
    /// touched.
    pub async fn run(&self, queue: OrderedQueue) -> Result<MigrationReport, MigrateError> {
        let mut report = MigrationReport::default();
        let total = queue.len();

        for (index, record) in queue.into_iter().enumerate() {
            debug!(index, total, path = %record.path.display(), "next file");
            let outcome = self.transfer(&record).await?;
            report.push(record, outcome);
        }

        Ok(report)
    }

    /// Runs the pipeline for a single file.
    pub async fn transfer(&self, record: &FileRecord) -> Result<TransferOutcome, MigrateError> {
        let file = self
            .local
            .open(&record.path)
            .map_err(|source| MigrateError::Open {
                path: record.path.clone(),
                source,
            })?;

        let name = record.file_name();
        info!(path = %record.path.display(), size = record.size, "uploading");

        let remote = match self.uploader.upload(&name, &file, record.size).await {
            Ok(remote) => remote,
            Err(e) => {
                warn!(path = %record.path.display(), error = %e, "upload failed, keeping local file");
                if let Err(close_err) = self.local.close(file) {
                    warn!(path = %record.path.display(), error = %close_err, "close failed after failed upload");
                }
                return Ok(TransferOutcome::UploadFailed {
                    error: e.to_string(),
                });
            }
        };
        info!(
            path = %record.path.display(),
            remote_id = %remote.id,
            size = record.size,
            "upload done"
        );

        if let Err(e) = self.local.close(file) {
            warn!(path = %record.path.display(), error = %e, "close failed, keeping local file");
            return Ok(TransferOutcome::LocalCloseFailed {
                remote,
                error: e.to_string(),
            });
        }

        if let Err(e) = self.local.remove(&record.path) {
            warn!(path = %record.path.display(), error = %e, "delete failed");
            return Ok(TransferOutcome::LocalDeleteFailed {
                remote,
                error: e.to_string(),
            });
        }

        info!(path = %record.path.display(), "deleted local file");
        Ok(TransferOutcome::Uploaded { remote })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::FsLocalFiles;
    use crate::types::RemoteObject;
    use multipixr_inventory::{build_queue, scan};
    use std::collections::HashSet;
    use std::fs::File;
    use std::future::Future;
    use std::io::{self, Read};
    use std::path::Path;
    use std::pin::Pin;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockUploader {
        fail: HashSet<String>,
        calls: Mutex<Vec<(String, Vec<u8>, u64)>>,
    }

    impl MockUploader {
        fn failing(names: &[&str]) -> Self {
            Self {
                fail: names.iter().map(|n| n.to_string()).collect(),
                ..Default::default()
            }
        }

        fn names(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(n, _, _)| n.clone())
                .collect()
        }
    }

    impl Uploader for MockUploader {
        fn upload<'a>(
            &'a self,
            name: &'a str,
            file: &'a File,
            size: u64,
        ) -> Pin<Box<dyn Future<Output = Result<RemoteObject, MigrateError>> + Send + 'a>> {
            Box::pin(async move {
                let mut data = Vec::new();
                let mut reader = file;
                reader.read_to_end(&mut data)?;
                self.calls
                    .lock()
                    .unwrap()
                    .push((name.to_string(), data, size));

                if self.fail.contains(name) {
                    return Err(MigrateError::Upload("503 Service Unavailable".into()));
                }
                Ok(RemoteObject {
                    id: format!("id-{name}"),
                    name: name.to_string(),
                    size: Some(size),
                })
            })
        }
    }

    /// Real filesystem with injectable per-file failures, keyed by base name.
    #[derive(Default)]
    struct FaultyLocal {
        fail_open: HashSet<String>,
        fail_close: HashSet<String>,
        fail_remove: HashSet<String>,
        // Handles are matched to names by opening order.
        open_names: Mutex<Vec<String>>,
    }

    fn base(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl LocalFiles for FaultyLocal {
        fn open(&self, path: &Path) -> io::Result<File> {
            let name = base(path);
            if self.fail_open.contains(&name) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            let file = FsLocalFiles.open(path)?;
            self.open_names.lock().unwrap().push(name);
            Ok(file)
        }

        fn close(&self, file: File) -> io::Result<()> {
            let name = self.open_names.lock().unwrap().pop().unwrap_or_default();
            FsLocalFiles.close(file)?;
            if self.fail_close.contains(&name) {
                return Err(io::Error::other("close failed"));
            }
            Ok(())
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            if self.fail_remove.contains(&base(path)) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "busy"));
            }
            FsLocalFiles.remove(path)
        }
    }

    fn write(dir: &Path, name: &str, len: usize) {
        std::fs::write(dir.join(name), vec![b'x'; len]).unwrap();
    }

    fn abc_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "A", 10);
        write(dir.path(), "B", 5);
        write(dir.path(), "C", 20);
        dir
    }

    fn queue_for(dir: &Path) -> OrderedQueue {
        build_queue(scan(dir).unwrap())
    }

    #[tokio::test]
    async fn smallest_first_and_failed_upload_is_kept() {
        let dir = abc_tree();
        let uploader = MockUploader::failing(&["B"]);
        let local = FsLocalFiles;
        let exec = TransferExecutor::new(&uploader, &local);

        let report = exec.run(queue_for(dir.path())).await.unwrap();

        assert_eq!(uploader.names(), vec!["B", "A", "C"]);
        assert!(dir.path().join("B").exists());
        assert!(!dir.path().join("A").exists());
        assert!(!dir.path().join("C").exists());

        assert_eq!(report.len(), 3);
        assert_eq!(report.deleted(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.bytes_uploaded(), 30);
        assert!(matches!(
            report.entries()[0].1,
            TransferOutcome::UploadFailed { .. }
        ));
    }

    #[tokio::test]
    async fn all_uploads_succeed_empties_tree() {
        let dir = abc_tree();
        let uploader = MockUploader::default();
        let local = FsLocalFiles;

        let report = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        assert_eq!(report.deleted(), 3);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn all_uploads_fail_leaves_tree_intact() {
        let dir = abc_tree();
        let uploader = MockUploader::failing(&["A", "B", "C"]);
        let local = FsLocalFiles;

        let report = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        assert_eq!(uploader.names(), vec!["B", "A", "C"]);
        assert_eq!(report.deleted(), 0);
        assert_eq!(report.failed(), 3);
        for name in ["A", "B", "C"] {
            assert!(dir.path().join(name).exists());
        }
    }

    #[tokio::test]
    async fn close_failure_keeps_local_file() {
        let dir = abc_tree();
        let uploader = MockUploader::default();
        let local = FaultyLocal {
            fail_close: ["A".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let report = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        assert!(dir.path().join("A").exists());
        assert!(!dir.path().join("B").exists());
        assert!(!dir.path().join("C").exists());
        assert!(matches!(
            report.entries()[1].1,
            TransferOutcome::LocalCloseFailed { .. }
        ));
        assert_eq!(report.uploaded(), 3);
    }

    #[tokio::test]
    async fn delete_failure_continues() {
        let dir = abc_tree();
        let uploader = MockUploader::default();
        let local = FaultyLocal {
            fail_remove: ["B".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let report = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        assert_eq!(uploader.names(), vec!["B", "A", "C"]);
        assert!(dir.path().join("B").exists());
        assert!(!dir.path().join("A").exists());
        match &report.entries()[0].1 {
            TransferOutcome::LocalDeleteFailed { remote, error } => {
                assert_eq!(remote.id, "id-B");
                assert!(error.contains("busy"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn open_failure_halts_run() {
        let dir = abc_tree();
        let uploader = MockUploader::default();
        let local = FaultyLocal {
            fail_open: ["A".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let err = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap_err();

        assert!(matches!(err, MigrateError::Open { ref path, .. } if path.ends_with("A")));
        // B was processed before the failure; C never reached.
        assert_eq!(uploader.names(), vec!["B"]);
        assert!(!dir.path().join("B").exists());
        assert!(dir.path().join("A").exists());
        assert!(dir.path().join("C").exists());
    }

    #[tokio::test]
    async fn empty_queue_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let uploader = MockUploader::default();
        let local = FsLocalFiles;

        let report = TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        assert!(report.is_empty());
        assert!(uploader.names().is_empty());
    }

    #[tokio::test]
    async fn uploader_receives_base_name_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("2019").join("summer");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join("IMG_0042.jpg"), b"\xff\xd8JPEGDATA").unwrap();

        let uploader = MockUploader::default();
        let local = FsLocalFiles;
        TransferExecutor::new(&uploader, &local)
            .run(queue_for(dir.path()))
            .await
            .unwrap();

        let calls = uploader.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "IMG_0042.jpg");
        assert_eq!(calls[0].1, b"\xff\xd8JPEGDATA");
        assert_eq!(calls[0].2, 10);
        assert!(!sub.join("IMG_0042.jpg").exists());
        // Directories are never removed.
        assert!(sub.is_dir());
    }

    #[tokio::test]
    async fn file_removed_after_scan_is_fatal() {
        let dir = abc_tree();
        let queue = queue_for(dir.path());
        std::fs::remove_file(dir.path().join("B")).unwrap();

        let uploader = MockUploader::default();
        let local = FsLocalFiles;
        let err = TransferExecutor::new(&uploader, &local)
            .run(queue)
            .await
            .unwrap_err();

        assert!(matches!(err, MigrateError::Open { .. }));
        assert!(uploader.names().is_empty());
    }
}
