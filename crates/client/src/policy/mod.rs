//! Fetch cache policy engine.
//!
//! Every intercepted request is classified by host and dispatched to one of
//! two strategies:
//!
//! | class         | strategy                              | buckets touched      |
//! |---------------|---------------------------------------|----------------------|
//! | `Accelerated` | cache-first, network fallback         | accelerated only     |
//! | `Default`     | network-first, 503 `Offline` fallback | none                 |
//!
//! Non-`GET` requests are never cached and always take the network path.
//! Responses larger than `max_entry_bytes` are served but not stored.
//! No error escapes [`CachePolicy::handle`]: the worst outcome is the
//! synthesized 503.

pub mod classifier;
mod strategy;

use std::sync::Arc;
use std::time::Duration;

use swcache_core::{AppConfig, BucketName, CacheStore};

use crate::fetch::{FetchError, Fetcher, Request, Response};

pub use classifier::{OriginClass, OriginClassifier};

/// Bucket names and routing rules for one policy version.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    pub general_bucket: BucketName,
    pub accelerated_bucket: BucketName,
    pub accelerated_hosts: Vec<String>,
    /// Upper bound on any single network fetch.
    pub fetch_timeout: Duration,
    /// Largest body stored in the accelerated bucket.
    pub max_entry_bytes: usize,
}

impl PolicyConfig {
    pub fn from_app(config: &AppConfig) -> Self {
        Self {
            general_bucket: config.general_bucket(),
            accelerated_bucket: config.accelerated_bucket(),
            accelerated_hosts: config.accelerated_hosts.clone(),
            fetch_timeout: config.timeout(),
            max_entry_bytes: config.max_bytes,
        }
    }

    /// The two bucket names this version owns.
    pub fn current_buckets(&self) -> [String; 2] {
        [self.general_bucket.to_string(), self.accelerated_bucket.to_string()]
    }

    pub fn is_current(&self, bucket: &str) -> bool {
        self.current_buckets().iter().any(|b| b == bucket)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::from_app(&AppConfig::default())
    }
}

/// Classifies requests and resolves them through the cache store and fetcher.
pub struct CachePolicy {
    config: PolicyConfig,
    classifier: OriginClassifier,
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
}

impl CachePolicy {
    pub fn new(config: PolicyConfig, store: Arc<dyn CacheStore>, fetcher: Arc<dyn Fetcher>) -> Self {
        let classifier = OriginClassifier::new(&config.accelerated_hosts);
        Self { config, classifier, store, fetcher }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn classify(&self, request: &Request) -> OriginClass {
        self.classifier.classify(&request.url)
    }

    /// Resolve a request to a response. Never fails.
    pub async fn handle(&self, request: &Request) -> Response {
        match self.classify(request) {
            OriginClass::Accelerated if request.is_cacheable() => self.cache_first(request).await,
            _ => self.network_first(request).await,
        }
    }

    /// Fetch from the network, bounded by the configured timeout.
    async fn fetch_network(&self, request: &Request) -> Result<Response, FetchError> {
        let timeout = self.config.fetch_timeout;
        match tokio::time::timeout(timeout, self.fetcher.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(timeout.as_millis() as u64)),
        }
    }
}
