use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header;

use crate::error::FetchError;

/// Validation metadata from a HEAD probe, body untouched.
#[derive(Debug, Clone, Default)]
pub struct ProbeMetadata {
    /// ETag header value, verbatim.
    pub etag: Option<String>,
    /// Last-Modified header value, verbatim.
    pub last_modified: Option<String>,
    /// Content-Length header value.
    pub content_length: Option<u64>,
}

impl ProbeMetadata {
    /// True when the probe carried nothing usable for change detection.
    pub fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none() && self.content_length.is_none()
    }
}

/// Asynchronous HTTP client abstraction.
///
/// The minimal surface the sync pipeline needs: a metadata-only probe and a
/// full body retrieval. Implementations own their timeout configuration and
/// map transport failures to [`FetchError`].
pub trait HttpClient: Send + Sync {
    /// Issue a HEAD request and return validation metadata.
    ///
    /// Non-2xx responses are errors; the caller treats any probe error as
    /// "no fingerprint available".
    fn probe(&self, url: &str) -> impl Future<Output = Result<ProbeMetadata, FetchError>> + Send;

    /// Retrieve the full response body.
    fn get(&self, url: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send;
}

/// Production client backed by `reqwest`.
///
/// Clones share the underlying connection pool, so one instance serves every
/// worker in a run and TCP connections are reused across resources.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

fn header_str(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

impl HttpClient for ReqwestClient {
    async fn probe(&self, url: &str) -> Result<ProbeMetadata, FetchError> {
        let response = self.client.head(url).send().await?.error_for_status()?;
        let headers = response.headers();

        Ok(ProbeMetadata {
            etag: header_str(headers, header::ETAG),
            last_modified: header_str(headers, header::LAST_MODIFIED),
            content_length: header_str(headers, header::CONTENT_LENGTH)
                .and_then(|s| s.parse().ok()),
        })
    }

    async fn get(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_metadata_is_empty_only_without_any_field() {
        assert!(ProbeMetadata::default().is_empty());
        assert!(!ProbeMetadata {
            etag: Some("\"abc\"".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!ProbeMetadata {
            content_length: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
