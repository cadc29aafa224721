//! Drive API data types.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Metadata part of an insert request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub title: String,
    pub mime_type: String,
}

impl FileMetadata {
    /// Metadata for a file titled `title`, typed from its extension.
    pub fn for_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            mime_type: detect_content_type(title).to_string(),
        }
    }
}

/// File resource returned by the insert call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Drive v2 reports sizes as decimal strings.
    #[serde(default)]
    pub file_size: Option<String>,
}

impl DriveFile {
    pub fn size(&self) -> Option<u64> {
        self.file_size.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Detects the MIME type of a file from its extension.
///
/// Unknown extensions are sent as `application/octet-stream`.
pub fn detect_content_type(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("heic") => "image/heic",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "application/octet-stream",
    }
}
