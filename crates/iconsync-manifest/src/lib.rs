//! Manifest model, merge semantics and dump writers.
//!
//! The manifest is the persisted record of every resource ever seen: its
//! change-detection fingerprint, where it came from, and where its bytes live.
//! Entries are never deleted; a resource that disappears upstream keeps its
//! entry with a blanked `origin` (a tombstone).

mod dump;
mod entry;
mod error;

pub use dump::{CSV_DUMP, JSON_DUMP, MD_DUMP, write_all, write_csv, write_json, write_md};
pub use entry::{Manifest, ManifestEntry, merge};
pub use error::ManifestError;
