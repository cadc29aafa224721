//! OAuth2 installed-application client for Google accounts.

use std::future::Future;
use std::pin::Pin;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::token::{Token, TokenResponse};

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

/// Out-of-band redirect: the consent page shows the code for the user to paste.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Client identity and endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
}

impl OAuthConfig {
    /// Google endpoints with full Drive scope.
    pub fn google_drive(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: DRIVE_SCOPE.into(),
            auth_url: GOOGLE_AUTH_URL.into(),
            token_url: GOOGLE_TOKEN_URL.into(),
            redirect_uri: OOB_REDIRECT_URI.into(),
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }
}

/// PKCE verifier and its S256 challenge.
#[derive(Debug, Clone)]
pub struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

impl Pkce {
    /// Generates a fresh 64-character verifier.
    pub fn generate() -> Self {
        let verifier = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::from_verifier(verifier)
    }

    pub fn from_verifier(verifier: String) -> Self {
        let digest = Sha256::digest(verifier.as_bytes());
        let challenge = URL_SAFE_NO_PAD.encode(digest);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Renews an access token from a refresh token.
///
/// Implemented by [`OAuthClient`]; the seam keeps the transport testable.
pub trait TokenRefresher: Send + Sync {
    fn refresh<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Token, AuthError>> + Send + 'a>>;
}

/// Talks to the authorization and token endpoints.
pub struct OAuthClient {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(http: reqwest::Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Builds the consent URL the user opens in a browser.
    pub fn authorization_url(&self, pkce: &Pkce) -> Result<Url, AuthError> {
        Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", self.config.scope.as_str()),
                ("access_type", "offline"),
                ("code_challenge", pkce.challenge.as_str()),
                ("code_challenge_method", "S256"),
            ],
        )
        .map_err(|e| AuthError::InvalidUrl(format!("{}: {e}", self.config.auth_url)))
    }

    /// Exchanges an authorization code for a token.
    pub async fn exchange_code(&self, code: &str, pkce: &Pkce) -> Result<Token, AuthError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code_verifier", pkce.verifier.as_str()),
        ];
        let resp = self.request_token(&params).await?;
        Ok(resp.into_token(Utc::now(), None))
    }

    /// Obtains a new access token using a refresh token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, AuthError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];
        let resp = self.request_token(&params).await?;
        Ok(resp.into_token(Utc::now(), Some(refresh_token)))
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| AuthError::Http(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Http(format!("failed to read token response: {e}")))?;

        if !status.is_success() {
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
                message: describe_error_body(&body),
            });
        }

        debug!(status = status.as_u16(), "token endpoint responded");
        Ok(serde_json::from_str(&body)?)
    }
}

impl TokenRefresher for OAuthClient {
    fn refresh<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Token, AuthError>> + Send + 'a>> {
        Box::pin(self.refresh_token(refresh_token))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Extracts a readable message from a token endpoint error body.
fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error,
            error_description: Some(desc),
        }) => format!("{error}: {desc}"),
        Ok(ErrorBody { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}
