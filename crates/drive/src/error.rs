//! Drive client error types.

/// Errors produced by Drive API calls.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("authentication error: {0}")]
    Auth(#[from] multipixr_auth::AuthError),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Drive API returned {status}: {message}")]
    Status { status: u16, message: String },
}
