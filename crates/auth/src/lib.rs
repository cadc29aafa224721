//! OAuth2 credentials for the Drive API.
//!
//! - **Cache**: tokens persist as JSON in a per-user file
//! - **Flow**: the interactive installed-app flow runs only when the cache is empty
//! - **Transport**: an HTTP client that attaches the bearer token to each request,
//!   refreshing and re-caching it when it expires

pub mod cache;
pub mod error;
pub mod flow;
pub mod oauth;
pub mod token;
pub mod transport;

pub use cache::{TokenCache, default_cache_path};
pub use error::AuthError;
pub use flow::{Authenticator, CodePrompt, InteractiveFlow, StdinPrompt, obtain_token};
pub use oauth::{OAuthClient, OAuthConfig, Pkce, TokenRefresher};
pub use token::{Token, TokenResponse};
pub use transport::AuthenticatedTransport;
