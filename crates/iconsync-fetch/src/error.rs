use thiserror::Error;

/// Errors surfaced by probe and fetch operations.
///
/// Per-resource failures are recoverable by design: the caller skips the
/// resource for this run and leaves its previous manifest entry untouched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {status} for {url}")]
    Http { status: u16, url: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}
