use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::error::FetchError;
use crate::fingerprint::content_fingerprint;
use crate::http::HttpClient;

/// Retrieves a resource's full body and fingerprints it.
///
/// No filesystem side effects: the caller decides whether the bytes are worth
/// persisting, so nothing is written for resources ultimately deemed
/// unchanged.
pub struct Fetcher<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Download the body and return it together with its content fingerprint.
    pub async fn fetch(&self, url: &str) -> Result<(Bytes, String), FetchError> {
        let body = self.client.get(url).await?;
        let fingerprint = content_fingerprint(&body);
        debug!(url, bytes = body.len(), %fingerprint, "fetched");
        Ok((body, fingerprint))
    }
}
