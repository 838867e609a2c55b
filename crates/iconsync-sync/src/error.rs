use std::path::PathBuf;

use iconsync_fetch::FetchError;
use thiserror::Error;

/// Per-resource failure.
///
/// Always recovered at the batch level: the resource is skipped for this run
/// and silently retried on the next one.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("worker pool closed before the resource was processed")]
    PoolClosed,
}
