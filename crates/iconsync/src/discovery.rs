//! The discovery collaborator boundary.
//!
//! Discovery itself (scraping the rendered wiki page) happens outside this
//! process; what arrives here is its output, a JSON object of icon name to
//! remote URL. A mapping that cannot be produced is fatal for the whole run.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use iconsync_sync::Resource;
use tracing::warn;

/// Name prefixes of the official map namespace. Discovery is expected to
/// filter to these already; this guard drops anything a misbehaving
/// collaborator lets through.
const OFFICIAL_PREFIXES: [&str; 5] = ["de_", "dz_", "gd_", "cs_", "ar_"];

pub trait Discovery {
    /// Produce the name → URL mapping for this run.
    fn discover(&self) -> anyhow::Result<BTreeMap<String, String>>;
}

/// Reads the mapping from a JSON file, or stdin when the path is `-`.
pub struct MappingFile {
    path: PathBuf,
}

impl MappingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Discovery for MappingFile {
    fn discover(&self) -> anyhow::Result<BTreeMap<String, String>> {
        let raw = if self.path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading discovery mapping from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.path)
                .with_context(|| format!("reading discovery mapping {}", self.path.display()))?
        };

        serde_json::from_str(&raw).context("parsing discovery mapping")
    }
}

fn is_official(name: &str) -> bool {
    OFFICIAL_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Normalize discovered names to lowercase and drop anything outside the
/// official namespace.
pub fn filter_official(mapping: BTreeMap<String, String>) -> Vec<Resource> {
    mapping
        .into_iter()
        .filter_map(|(name, url)| {
            let name = name.to_lowercase();
            if is_official(&name) {
                Some(Resource::new(name, url))
            } else {
                warn!(map = %name, "dropping icon outside the official namespace");
                None
            }
        })
        .collect()
}
