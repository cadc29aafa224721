//! Sequential migration of an ordered file queue to remote storage.
//!
//! This crate implements the **transfer state machine**. It has no storage or
//! HTTP dependencies: the binary supplies an [`Uploader`] that bridges to the
//! actual remote API.
//!
//! # Per-file pipeline
//!
//! 1. **Open**: acquire a read handle (failure halts the whole run)
//! 2. **Upload**: stream the file under its base name
//! 3. **Close**: release the handle
//! 4. **Delete**: remove the local file, only after a confirmed upload and a clean close
//!
//! A failure in steps 2 to 4 abandons that file only; the queue moves on.

pub mod error;
pub mod executor;
pub mod local;
pub mod types;
pub mod uploader;

pub use error::MigrateError;
pub use executor::TransferExecutor;
pub use local::{FsLocalFiles, LocalFiles};
pub use types::{MigrationReport, RemoteObject, TransferOutcome};
pub use uploader::Uploader;
