//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Moves every file under the configured root to Google Drive, smallest
/// first, deleting each local copy once its upload is confirmed.
#[derive(Debug, Parser)]
#[command(name = "multipixr", version)]
pub struct Cli {
    /// JSON configuration file with ClientId, ClientSecret and Path.
    #[arg(long, default_value = "multipixr.json")]
    pub config: PathBuf,

    /// OAuth token cache file [default: $HOME/.multipixr-request-token].
    #[arg(long)]
    pub cachefile: Option<PathBuf>,

    /// Print the upload order without authenticating or touching any file.
    #[arg(long)]
    pub dry_run: bool,
}
