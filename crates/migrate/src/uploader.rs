//! Remote upload seam.

use std::fs::File;
use std::future::Future;
use std::pin::Pin;

use crate::error::MigrateError;
use crate::types::RemoteObject;

/// Abstract upload capability.
///
/// The binary implements this on top of the Drive client. Using a trait keeps
/// the transfer logic decoupled from HTTP and testable with mocks.
pub trait Uploader: Send + Sync {
    /// Uploads `size` bytes read from `file` as a remote object named `name`.
    ///
    /// The handle stays owned by the caller, which closes it afterwards.
    fn upload<'a>(
        &'a self,
        name: &'a str,
        file: &'a File,
        size: u64,
    ) -> Pin<Box<dyn Future<Output = Result<RemoteObject, MigrateError>> + Send + 'a>>;
}
