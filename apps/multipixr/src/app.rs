//! Application orchestrator: wires configuration, credentials, the Drive
//! client and the transfer executor together.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use multipixr_auth::{
    AuthenticatedTransport, InteractiveFlow, OAuthClient, StdinPrompt, TokenCache,
    default_cache_path, obtain_token,
};
use multipixr_drive::DriveClient;
use multipixr_inventory::{OrderedQueue, build_queue, scan};
use multipixr_migrate::{FsLocalFiles, MigrationReport, TransferExecutor, Uploader};
use tracing::info;

use crate::cli::Cli;
use crate::config::Config;
use crate::drive_adapter::DriveAdapter;

/// Runs one migration to completion.
///
/// Returns an error only for fatal conditions; per-file failures are logged
/// and summarized.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;
    info!(path = %config.path.display(), "pictures path");

    if cli.dry_run {
        let queue = ordered_queue(&config.path)?;
        print_queue(&queue);
        return Ok(());
    }

    // -- Credentials --
    let cache_path = match cli.cachefile {
        Some(path) => path,
        None => default_cache_path()
            .context("cannot locate the home directory for the token cache, pass --cachefile")?,
    };
    let cache = TokenCache::new(cache_path);

    let http = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.upload_timeout())
        .build()
        .context("failed to build HTTP client")?;
    let oauth = Arc::new(OAuthClient::new(http.clone(), config.oauth_config()));

    let flow = InteractiveFlow::new(Arc::clone(&oauth), StdinPrompt);
    let token = obtain_token(&cache, &flow)
        .await
        .context("authentication failed")?;

    // -- Drive --
    let transport = Arc::new(AuthenticatedTransport::new(http, oauth, cache, token));
    let uploader = DriveAdapter::new(DriveClient::new(transport));

    // -- Migration --
    let report = migrate(&config.path, &uploader).await?;
    log_summary(&report);
    Ok(())
}

/// Scans `root`, orders it and transfers every file through `uploader`.
pub async fn migrate(root: &Path, uploader: &dyn Uploader) -> anyhow::Result<MigrationReport> {
    let queue = ordered_queue(root)?;
    info!(files = queue.len(), bytes = queue.total_size(), "starting migration");

    let local = FsLocalFiles;
    let report = TransferExecutor::new(uploader, &local).run(queue).await?;
    Ok(report)
}

fn ordered_queue(root: &Path) -> anyhow::Result<OrderedQueue> {
    let inventory = scan(root)?;
    Ok(build_queue(inventory))
}

fn print_queue(queue: &OrderedQueue) {
    for record in queue {
        println!("{:>12}  {}", record.size, record.path.display());
    }
    println!("{} files, {} bytes", queue.len(), queue.total_size());
}

fn log_summary(report: &MigrationReport) {
    info!(
        files = report.len(),
        uploaded = report.uploaded(),
        deleted = report.deleted(),
        failed = report.failed(),
        bytes = report.bytes_uploaded(),
        "migration finished"
    );
}
