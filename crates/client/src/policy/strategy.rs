//! The two caching strategies.
//!
//! Cache store failures fail open: a failed lookup counts as a miss and a
//! failed write is logged, so storage problems degrade to plain network
//! pass-through instead of surfacing as errors.

use swcache_core::RequestKey;

use super::CachePolicy;
use crate::fetch::{Request, Response};

impl CachePolicy {
    /// Cache-first with network fallback, for accelerated hosts.
    pub(super) async fn cache_first(&self, request: &Request) -> Response {
        let bucket = self.config.accelerated_bucket.to_string();
        let key = request.cache_key();

        if let Some(cached) = self.lookup(&bucket, &key).await {
            tracing::debug!(url = %request.url, bucket = %bucket, "cache hit");
            return cached;
        }
        tracing::debug!(url = %request.url, bucket = %bucket, "cache miss");

        match self.fetch_network(request).await {
            Ok(response) => {
                if !response.is_storable() {
                    tracing::debug!(url = %request.url, status = response.status.as_u16(), "not caching non-200 response");
                } else if response.body.len() > self.config.max_entry_bytes {
                    tracing::debug!(
                        url = %request.url,
                        size = response.body.len(),
                        limit = self.config.max_entry_bytes,
                        "not caching oversized response"
                    );
                } else {
                    self.put(&bucket, &key, &response).await;
                }
                response
            }
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "fetch failed for accelerated resource");
                // a concurrent request may have stored the entry after our miss
                self.lookup(&bucket, &key).await.unwrap_or_else(Response::offline)
            }
        }
    }

    /// Network only, with the 503 fallback, for everything else.
    pub(super) async fn network_first(&self, request: &Request) -> Response {
        match self.fetch_network(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %request.url, error = %e, "fetch failed; responding offline");
                Response::offline()
            }
        }
    }

    async fn lookup(&self, bucket: &str, key: &RequestKey) -> Option<Response> {
        match self.store.lookup(bucket, key).await {
            Ok(found) => found.map(Response::from_cached),
            Err(e) => {
                tracing::warn!(bucket, url = %key.url, error = %e, "cache lookup failed; treating as miss");
                None
            }
        }
    }

    async fn put(&self, bucket: &str, key: &RequestKey, response: &Response) {
        if let Err(e) = self.store.store(bucket, key, &response.to_cached()).await {
            tracing::warn!(bucket, url = %key.url, error = %e, "cache write failed");
        }
    }
}
