use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "iconsync",
    about = "Mirror remote map icons locally and maintain a merged manifest"
)]
pub struct Cli {
    /// JSON mapping of icon name to remote URL, produced by the discovery
    /// scraper. Pass "-" to read it from stdin.
    #[arg(long, env = "ICONSYNC_DISCOVERY", default_value = "data/discovered.json")]
    pub discovery: PathBuf,

    /// Directory downloaded icons are written to.
    #[arg(long, default_value = "images")]
    pub images_dir: PathBuf,

    /// Directory the manifest dumps are written to.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Maximum concurrent downloads. Defaults to twice the core count,
    /// capped at 8.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}
