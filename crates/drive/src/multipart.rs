//! Streamed `multipart/related` request bodies.

use bytes::Bytes;
use futures_util::future;
use futures_util::stream::{self, Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::error::DriveError;
use crate::types::FileMetadata;

/// Metadata part plus framing around a media part of known length.
///
/// Only the framing is held in memory; the media is streamed from a reader.
#[derive(Debug, Clone)]
pub struct RelatedBody {
    boundary: String,
    head: Vec<u8>,
    tail: Vec<u8>,
}

impl RelatedBody {
    pub fn new(metadata: &FileMetadata) -> Result<Self, DriveError> {
        Self::with_boundary(metadata, format!("multipixr-{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(metadata: &FileMetadata, boundary: String) -> Result<Self, DriveError> {
        let json = serde_json::to_string(metadata)?;
        let head = format!(
            "--{boundary}\r\n\
             Content-Type: application/json; charset=UTF-8\r\n\r\n\
             {json}\r\n\
             --{boundary}\r\n\
             Content-Type: {mime}\r\n\r\n",
            mime = metadata.mime_type,
        )
        .into_bytes();
        let tail = format!("\r\n--{boundary}--\r\n").into_bytes();

        Ok(Self {
            boundary,
            head,
            tail,
        })
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/related; boundary={}", self.boundary)
    }

    /// Total body length for a media part of `media_len` bytes.
    pub fn content_length(&self, media_len: u64) -> u64 {
        self.head.len() as u64 + media_len + self.tail.len() as u64
    }

    /// Head, then the media read from `media`, then the closing boundary.
    pub fn into_stream<R>(self, media: R) -> impl Stream<Item = std::io::Result<Bytes>> + Send + 'static
    where
        R: AsyncRead + Send + 'static,
    {
        let Self { head, tail, .. } = self;
        let head = stream::once(future::ready(Ok::<_, std::io::Error>(Bytes::from(head))));
        let tail = stream::once(future::ready(Ok(Bytes::from(tail))));
        head.chain(ReaderStream::new(media)).chain(tail)
    }

    pub fn into_body<R>(self, media: R) -> reqwest::Body
    where
        R: AsyncRead + Send + 'static,
    {
        reqwest::Body::wrap_stream(self.into_stream(media))
    }
}
