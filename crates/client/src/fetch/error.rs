//! Network fetch error types.
//!
//! These never reach a tool caller: the policy engine turns every fetch
//! failure into a cache fallback or the synthesized 503.

use std::sync::Arc;

/// A fetch that produced no response.
///
/// Non-success HTTP statuses are not errors; they come back as responses.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, TLS, or protocol failure.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// No response within the configured timeout.
    #[error("fetch timed out after {0}ms")]
    Timeout(u64),

    /// HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Failure raised by a non-HTTP fetcher.
    #[error("fetch failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(Arc::new(err))
    }
}
