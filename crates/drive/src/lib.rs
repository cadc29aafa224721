//! Google Drive v2 upload client.
//!
//! Inserts a file into the root of the user's Drive with a single
//! `multipart/related` request: JSON metadata first, then the media streamed
//! straight from the local file.

pub mod client;
pub mod error;
pub mod multipart;
pub mod types;

pub use client::{DEFAULT_UPLOAD_URL, DriveClient};
pub use error::DriveError;
pub use multipart::RelatedBody;
pub use types::{DriveFile, FileMetadata, detect_content_type};
