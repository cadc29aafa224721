//! Authentication error types.

/// Errors produced while obtaining or using credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("token endpoint returned {status}: {message}")]
    TokenEndpoint { status: u16, message: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("no authorization code entered")]
    MissingCode,

    #[error("access token expired and no refresh token is available")]
    Expired,
}
