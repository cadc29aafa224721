//! Run configuration.
//!
//! Read from a JSON file, `./multipixr.json` unless `--config` says otherwise:
//!
//! ```json
//! { "ClientId": "...", "ClientSecret": "...", "Path": "/photos" }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, ensure};
use multipixr_auth::OAuthConfig;
use multipixr_auth::oauth::OOB_REDIRECT_URI;
use serde::{Deserialize, Serialize};

/// Migration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// OAuth client identifier of the installed application.
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// Root of the local tree to migrate.
    #[serde(default)]
    pub path: PathBuf,

    /// Upper bound for a single upload request, in seconds.
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_secs: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
}

fn default_upload_timeout() -> u64 {
    600
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_redirect_uri() -> String {
    OOB_REDIRECT_URI.into()
}

impl Config {
    /// Reads, parses and validates the file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read configuration {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("invalid configuration {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.client_id.trim().is_empty(), "ClientId is empty");
        ensure!(!self.client_secret.trim().is_empty(), "ClientSecret is empty");
        ensure!(!self.path.as_os_str().is_empty(), "Path is empty");
        ensure!(self.upload_timeout_secs > 0, "UploadTimeoutSecs must be positive");
        ensure!(self.connect_timeout_secs > 0, "ConnectTimeoutSecs must be positive");
        Ok(())
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// OAuth settings for Google Drive with this client's credentials.
    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig::google_drive(&self.client_id, &self.client_secret)
            .with_redirect_uri(&self.redirect_uri)
    }
}
