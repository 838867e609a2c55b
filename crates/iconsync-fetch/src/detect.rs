use std::sync::Arc;

use tracing::debug;

use crate::fingerprint::{content_fingerprint, metadata_fingerprint};
use crate::http::HttpClient;

/// Derives a change-detection fingerprint for a remote resource, cheapest
/// probe first.
///
/// Preference order: ETag verbatim, then a digest of Last-Modified +
/// Content-Length, then a full body fetch and digest. Any transport failure
/// yields `None`, which callers treat as "unknown, must fetch".
pub struct ChangeDetector<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> ChangeDetector<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    pub async fn detect(&self, url: &str) -> Option<String> {
        match self.client.probe(url).await {
            Ok(meta) => {
                if meta.is_empty() {
                    debug!(url, "probe carried no validation metadata");
                } else if let Some(etag) = meta.etag {
                    debug!(url, "fingerprint from etag");
                    return Some(etag);
                } else if let Some(fp) =
                    metadata_fingerprint(meta.last_modified.as_deref(), meta.content_length)
                {
                    debug!(url, "fingerprint from probe metadata");
                    return Some(fp);
                }
            }
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                return None;
            }
        }

        // Metadata-less server: only the body itself can be fingerprinted.
        match self.client.get(url).await {
            Ok(body) => {
                debug!(url, "fingerprint from full content");
                Some(content_fingerprint(&body))
            }
            Err(e) => {
                debug!(url, error = %e, "content probe failed");
                None
            }
        }
    }
}
