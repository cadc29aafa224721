//! Adapter bridging `DriveClient` to the `Uploader` trait required by
//! `multipixr-migrate`.

use std::fs::File;
use std::future::Future;
use std::pin::Pin;

use multipixr_drive::DriveClient;
use multipixr_migrate::{MigrateError, RemoteObject, Uploader};

/// Implements `multipixr_migrate::Uploader` by delegating to `DriveClient`.
pub struct DriveAdapter {
    client: DriveClient,
}

impl DriveAdapter {
    pub fn new(client: DriveClient) -> Self {
        Self { client }
    }
}

impl Uploader for DriveAdapter {
    fn upload<'a>(
        &'a self,
        name: &'a str,
        file: &'a File,
        size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<RemoteObject, MigrateError>> + Send + 'a>> {
        Box::pin(async move {
            // A file that changed since the scan is kept for a later run.
            check_size(name, file, size)?;

            // The body stream needs an owned reader; the executor keeps its
            // own handle and closes it.
            let media = tokio::fs::File::from_std(file.try_clone()?);
            let inserted = self
                .client
                .insert_file(name, media, size)
                .await
                .map_err(|e| MigrateError::Upload(e.to_string()))?;

            // Only `size` bytes were sent; anything written meanwhile would be lost.
            check_size(name, file, size)?;

            Ok(RemoteObject {
                size: inserted.size(),
                id: inserted.id,
                name: inserted.title,
            })
        })
    }
}

fn check_size(name: &str, file: &File, expected: u64) -> Result<(), MigrateError> {
    let actual = file.metadata()?.len();
    if actual != expected {
        return Err(MigrateError::Upload(format!(
            "{name} changed size since scan: expected {expected} bytes, found {actual}"
        )));
    }
    Ok(())
}
