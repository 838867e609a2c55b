//! Per-resource sync decisions and the bounded-concurrency coordinator.
//!
//! Each resource is processed end-to-end by one task: probe for a fingerprint,
//! skip the transfer when nothing changed, otherwise fetch and persist. The
//! coordinator fans tasks out over a shared HTTP client with a bounded number
//! of concurrent workers and collects per-resource outcomes as values; one
//! failure never aborts the batch.

mod coordinator;
mod error;
mod outcome;
mod resource;
mod store;

pub use coordinator::{Coordinator, default_concurrency};
pub use error::SyncError;
pub use outcome::{Outcome, RunSummary};
pub use resource::Resource;
pub use store::AssetStore;
