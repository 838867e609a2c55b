use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use iconsync_fetch::{ChangeDetector, Fetcher, HttpClient};
use iconsync_manifest::{Manifest, ManifestEntry};
use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::error::SyncError;
use crate::outcome::{Outcome, RunSummary};
use crate::resource::Resource;
use crate::store::AssetStore;

/// Worker count: a small multiple of available parallelism, capped so a batch
/// never opens an unbounded number of connections against one server.
pub fn default_concurrency() -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2);
    (cores * 2).min(8)
}

/// Runs the whole resource set with bounded parallelism.
///
/// One task per resource, all sharing a single HTTP client (one connection
/// pool). Tasks are independent: a failed resource is logged, counted, and
/// absent from the result map; it never cancels or blocks its siblings.
/// There is no in-run retry, the next run picks failures up again.
pub struct Coordinator<C: HttpClient> {
    detector: ChangeDetector<C>,
    fetcher: Fetcher<C>,
    store: AssetStore,
    max_concurrent: usize,
}

impl<C: HttpClient + 'static> Coordinator<C> {
    pub fn new(client: C, store: AssetStore, max_concurrent: usize) -> Self {
        let client = Arc::new(client);
        Self {
            detector: ChangeDetector::new(Arc::clone(&client)),
            fetcher: Fetcher::new(client),
            store,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Sync every resource and collect the successful entries by name.
    pub async fn run_all(
        self: Arc<Self>,
        resources: Vec<Resource>,
        previous: &Manifest,
    ) -> (BTreeMap<String, ManifestEntry>, RunSummary) {
        let mut summary = RunSummary {
            found: resources.len(),
            ..Default::default()
        };

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = FuturesUnordered::new();

        for resource in resources {
            let prior_hash = previous.entries.get(&resource.name).map(|e| e.hash.clone());
            let this = Arc::clone(&self);
            let semaphore = Arc::clone(&semaphore);

            tasks.push(tokio::spawn(async move {
                let name = resource.name.clone();
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed in this module; count the
                    // resource as failed rather than run unthrottled.
                    Err(_) => return (name, Err(SyncError::PoolClosed)),
                };
                let result = this.sync_one(resource, prior_hash).await;
                (name, result)
            }));
        }

        let mut fresh = BTreeMap::new();
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok((name, Ok(outcome))) => {
                    info!(map = %name, "{}", outcome.label());
                    summary.record(&outcome);
                    fresh.insert(name, outcome.into_entry());
                }
                Ok((name, Err(e))) => {
                    warn!(map = %name, error = %e, "failed");
                    summary.failed += 1;
                }
                Err(e) => {
                    warn!(error = %e, "sync task aborted");
                    summary.failed += 1;
                }
            }
        }

        (fresh, summary)
    }

    /// Process one resource end-to-end: probe, maybe fetch, maybe persist.
    async fn sync_one(
        &self,
        resource: Resource,
        prior_hash: Option<String>,
    ) -> Result<Outcome, SyncError> {
        let file_name = resource.file_name();
        let probed = self.detector.detect(&resource.url).await;

        if let (Some(new_fp), Some(old_fp)) = (probed.as_deref(), prior_hash.as_deref())
            && new_fp == old_fp
            && self.store.exists(&file_name)
        {
            return Ok(Outcome::Unchanged(ManifestEntry {
                name: resource.name,
                hash: old_fp.to_string(),
                origin: resource.url,
                path: self.store.recorded_path(&file_name),
            }));
        }

        let (bytes, content_fp) = self.fetcher.fetch(&resource.url).await?;
        let path = self.store.persist(&file_name, &bytes).await?;

        let entry = ManifestEntry {
            name: resource.name,
            hash: probed.unwrap_or(content_fp),
            origin: resource.url,
            path,
        };

        Ok(match prior_hash {
            Some(_) => Outcome::Updated(entry),
            None => Outcome::New(entry),
        })
    }
}
