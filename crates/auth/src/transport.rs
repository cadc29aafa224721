//! HTTP transport carrying a valid bearer token.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::TokenCache;
use crate::error::AuthError;
use crate::oauth::TokenRefresher;
use crate::token::Token;

/// Authenticated HTTP client for the storage API.
///
/// Holds the current token, renews it through the refresher when it expires
/// and writes the renewed token back to the cache.
pub struct AuthenticatedTransport {
    http: reqwest::Client,
    refresher: Arc<dyn TokenRefresher>,
    cache: TokenCache,
    token: Mutex<Token>,
}

impl AuthenticatedTransport {
    pub fn new(
        http: reqwest::Client,
        refresher: Arc<dyn TokenRefresher>,
        cache: TokenCache,
        token: Token,
    ) -> Self {
        Self {
            http,
            refresher,
            cache,
            token: Mutex::new(token),
        }
    }

    /// The underlying client, carrying the configured timeouts.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns a usable access token, refreshing it first if expired.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut token = self.token.lock().await;
        if token.is_expired() {
            if !token.can_refresh() {
                return Err(AuthError::Expired);
            }
            debug!("access token expired, refreshing");
            let renewed = self.refresher.refresh(&token.refresh_token).await?;
            if let Err(e) = self.cache.save(&renewed) {
                warn!(path = %self.cache.path().display(), error = %e, "failed to cache refreshed token");
            }
            *token = renewed;
        }
        Ok(token.access_token.clone())
    }

    /// Attaches the bearer token to a request.
    pub async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, AuthError> {
        let access_token = self.access_token().await?;
        Ok(request.bearer_auth(access_token))
    }
}
