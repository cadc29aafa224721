//! Drive v2 insert client.

use std::sync::Arc;

use multipixr_auth::AuthenticatedTransport;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::error::DriveError;
use crate::multipart::RelatedBody;
use crate::types::{DriveFile, FileMetadata};

/// Multipart insert endpoint for Drive v2.
pub const DEFAULT_UPLOAD_URL: &str =
    "https://www.googleapis.com/upload/drive/v2/files?uploadType=multipart";

/// Uploads files into the root of the authenticated user's Drive.
pub struct DriveClient {
    transport: Arc<AuthenticatedTransport>,
    upload_url: String,
}

impl DriveClient {
    pub fn new(transport: Arc<AuthenticatedTransport>) -> Self {
        Self {
            transport,
            upload_url: DEFAULT_UPLOAD_URL.into(),
        }
    }

    /// Points the client at a different insert endpoint.
    pub fn with_upload_url(mut self, upload_url: impl Into<String>) -> Self {
        self.upload_url = upload_url.into();
        self
    }

    /// Inserts a file titled `title`, streaming `size` bytes from `media`.
    ///
    /// The file lands in the Drive root; no folder hierarchy is created. At most
    /// `size` bytes are read from `media`, so the body always matches the
    /// declared length; a shorter reader fails the request.
    pub async fn insert_file<R>(
        &self,
        title: &str,
        media: R,
        size: u64,
    ) -> Result<DriveFile, DriveError>
    where
        R: AsyncRead + Send + 'static,
    {
        let metadata = FileMetadata::for_title(title);
        let body = RelatedBody::new(&metadata)?;

        let request = self
            .transport
            .http()
            .post(&self.upload_url)
            .header(CONTENT_TYPE, body.content_type())
            .header(CONTENT_LENGTH, body.content_length(size))
            .body(body.into_body(media.take(size)));
        let request = self.transport.authorize(request).await?;

        let response = request
            .send()
            .await
            .map_err(|e| DriveError::Http(format!("upload of {title} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Status {
                status: status.as_u16(),
                message: describe_api_error(&body),
            });
        }

        let file: DriveFile = response
            .json()
            .await
            .map_err(|e| DriveError::Http(format!("invalid insert response for {title}: {e}")))?;

        debug!(title, id = %file.id, "drive insert complete");
        Ok(file)
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Extracts `error.message` from a Drive error body, falling back to the raw text.
fn describe_api_error(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.message,
        _ => body.trim().to_string(),
    }
}
