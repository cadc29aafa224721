//! Credential acquisition: cached token first, interactive flow otherwise.

use std::future::Future;
use std::io::{BufRead, Write};
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::TokenCache;
use crate::error::AuthError;
use crate::oauth::{OAuthClient, Pkce};
use crate::token::Token;

/// Produces a fresh token without consulting the cache.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self) -> Pin<Box<dyn Future<Output = Result<Token, AuthError>> + Send + '_>>;
}

/// Shows the consent URL to the user and returns the code they paste back.
pub trait CodePrompt: Send + Sync {
    fn read_code(&self, auth_url: &str) -> Result<String, AuthError>;
}

/// Prompts on the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl CodePrompt for StdinPrompt {
    fn read_code(&self, auth_url: &str) -> Result<String, AuthError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "Visit the URL below to authorize access to Google Drive:")?;
        writeln!(stdout, "{auth_url}")?;
        write!(stdout, "Enter verification code: ")?;
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        let code = line.trim();
        if code.is_empty() {
            return Err(AuthError::MissingCode);
        }
        Ok(code.to_string())
    }
}

/// Installed-app authorization code flow with PKCE.
pub struct InteractiveFlow<P> {
    client: Arc<OAuthClient>,
    prompt: P,
}

impl<P: CodePrompt> InteractiveFlow<P> {
    pub fn new(client: Arc<OAuthClient>, prompt: P) -> Self {
        Self { client, prompt }
    }
}

impl<P: CodePrompt> Authenticator for InteractiveFlow<P> {
    fn authenticate(&self) -> Pin<Box<dyn Future<Output = Result<Token, AuthError>> + Send + '_>> {
        Box::pin(async move {
            let pkce = Pkce::generate();
            let url = self.client.authorization_url(&pkce)?;
            let code = self.prompt.read_code(url.as_str())?;
            debug!("exchanging authorization code");
            self.client.exchange_code(&code, &pkce).await
        })
    }
}

/// Returns the cached token, running `auth` only when nothing usable is cached.
///
/// A freshly obtained token is written to the cache so later runs skip the
/// interactive step. An unreadable cache file counts as empty, and so does an
/// expired token that carries no refresh token.
pub async fn obtain_token(
    cache: &TokenCache,
    auth: &dyn Authenticator,
) -> Result<Token, AuthError> {
    match cache.load() {
        Ok(Some(token)) if token.is_expired() && !token.can_refresh() => {
            warn!(path = %cache.path().display(), "cached token expired and cannot be refreshed");
        }
        Ok(Some(token)) => {
            debug!(path = %cache.path().display(), "using cached token");
            return Ok(token);
        }
        Ok(None) => {}
        Err(e) => {
            warn!(path = %cache.path().display(), error = %e, "ignoring unreadable token cache");
        }
    }

    info!(path = %cache.path().display(), "no cached token, starting authorization");
    let token = auth.authenticate().await?;
    cache.save(&token)?;
    Ok(token)
}
