//! File-backed token cache.
//!
//! The cache holds a single token as pretty-printed JSON. A missing file means
//! nothing is cached yet.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::AuthError;
use crate::token::Token;

/// Default cache file name inside the user's home directory.
const DEFAULT_CACHE_FILE: &str = ".multipixr-request-token";

/// Persistent cache for the OAuth2 token.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached token, or `None` if the cache file does not exist.
    pub fn load(&self) -> Result<Option<Token>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(&self.path)?;
        let token: Token = serde_json::from_str(&data)?;
        debug!(path = %self.path.display(), "loaded cached token");
        Ok(Some(token))
    }

    /// Writes the token to disk, creating parent directories as needed.
    pub fn save(&self, token: &Token) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(token)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        set_permissions_0600(&self.path);
        debug!(path = %self.path.display(), "persisted token");
        Ok(())
    }
}

fn set_permissions_0600(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

/// Returns the default cache path: `$HOME/.multipixr-request-token`.
pub fn default_cache_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(DEFAULT_CACHE_FILE))
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
