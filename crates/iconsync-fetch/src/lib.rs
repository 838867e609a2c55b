//! HTTP probing, fetching and content fingerprinting.
//!
//! The [`HttpClient`] trait is the seam between the sync pipeline and the
//! network: production code uses [`ReqwestClient`] (one shared connection
//! pool per run), tests substitute counting mocks.
//!
//! Change detection is probe-first: a HEAD request is enough to fingerprint
//! most resources (ETag, or a digest of Last-Modified + Content-Length), and
//! only metadata-less servers force a full body transfer.

mod detect;
mod error;
mod fetcher;
mod fingerprint;
mod http;

pub use detect::ChangeDetector;
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use fingerprint::{content_fingerprint, metadata_fingerprint};
pub use http::{HttpClient, ProbeMetadata, ReqwestClient};
