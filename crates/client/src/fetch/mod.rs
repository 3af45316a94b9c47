//! Network side of the worker: request/response model and the HTTP fetcher.
//!
//! ### Fetcher contract
//! - Any HTTP status is a response, including 4xx/5xx; only the absence of a
//!   response (connection failure, timeout) is an error.
//! - Redirects are followed (max 5); the response carries the final URL.
//! - Bodies are returned whole regardless of size. Whether a body is small
//!   enough to keep in a bucket is the policy's call, not the fetcher's.

pub mod error;
pub mod request;
pub mod response;
pub mod url;

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use swcache_core::AppConfig;

pub use error::FetchError;
pub use request::Request;
pub use response::{OFFLINE_BODY, Response, ResponseSource};
pub use url::{UrlError, parse_request_url};

/// Something that turns a request into a network response.
///
/// The policy engine only talks to the network through this trait, so tests
/// can script responses and failures.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError>;
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: "sw-cache/0.1")
    pub user_agent: String,

    /// Request timeout (default: 20s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "sw-cache/0.1".to_string(),
            timeout: Duration::from_millis(20000),
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            user_agent: config.user_agent.clone(),
            timeout: config.timeout(),
            ..Default::default()
        }
    }
}

/// reqwest-backed [`Fetcher`].
pub struct HttpFetcher {
    http: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a new fetcher with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http, config })
    }

    fn map_send_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() { FetchError::Timeout(self.config.timeout.as_millis() as u64) } else { err.into() }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let start = Instant::now();

        let response = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let headers = response.headers().clone();

        let body = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        tracing::debug!(
            "fetched {} {} -> {} ({}) in {}ms ({} bytes)",
            request.method,
            request.url,
            final_url,
            status.as_u16(),
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(Response { url: Some(final_url), status, headers, body, source: ResponseSource::Network })
    }
}
