mod cli;
mod discovery;
mod env;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use iconsync_fetch::ReqwestClient;
use iconsync_manifest::{JSON_DUMP, Manifest, merge, write_all};
use iconsync_sync::{AssetStore, Coordinator, default_concurrency};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::discovery::{Discovery, MappingFile};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let public_prefix = env::public_url_prefix();

    let previous = Manifest::load(&cli.data_dir.join(JSON_DUMP));
    info!("loaded {} existing map(s)", previous.count);

    // Discovery is the only fatal step: without a mapping there is no run.
    // Per-resource failures below never affect the exit status.
    let mapping = MappingFile::new(&cli.discovery)
        .discover()
        .context("resource discovery failed")?;
    let resources = discovery::filter_official(mapping);
    info!("found {} icon(s)", resources.len());

    let client = ReqwestClient::new(Duration::from_secs(cli.timeout_secs))?;
    let store = AssetStore::new(&cli.images_dir, public_prefix);
    let concurrency = cli.concurrency.unwrap_or_else(default_concurrency);
    let coordinator = Arc::new(Coordinator::new(client, store, concurrency));

    let (fresh, summary) = coordinator.run_all(resources, &previous).await;

    let merged = merge(&fresh, &previous);
    let failed_dumps = write_all(&merged, &cli.data_dir);
    if failed_dumps > 0 {
        warn!(failed_dumps, "some dump artifacts were not written");
    }

    info!(
        found = summary.found,
        new = summary.new,
        updated = summary.updated,
        unchanged = summary.unchanged,
        failed = summary.failed,
        "sync complete"
    );
    Ok(())
}
