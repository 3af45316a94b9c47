//! Test helpers shared by the tool tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use rmcp::model::CallToolResult;
use swcache_client::{CachePolicy, FetchError, Fetcher, PolicyConfig, Request, Response, ResponseSource, ServiceWorker};
use swcache_core::CacheStore;

/// Fetcher that answers every request the same way.
pub(crate) struct StaticFetcher {
    body: Option<&'static [u8]>,
}

impl StaticFetcher {
    pub(crate) fn ok(body: &'static [u8]) -> Self {
        Self { body: Some(body) }
    }

    pub(crate) fn offline() -> Self {
        Self { body: None }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        let body = self.body.ok_or_else(|| FetchError::Other("network unreachable".into()))?;
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        Ok(Response {
            url: Some(request.url.clone()),
            status: StatusCode::OK,
            headers,
            body: Bytes::from_static(body),
            source: ResponseSource::Network,
        })
    }
}

/// An installed worker with the default bucket names.
pub(crate) async fn active_worker(store: Arc<dyn CacheStore>, fetcher: StaticFetcher) -> ServiceWorker {
    let worker = ServiceWorker::new(CachePolicy::new(PolicyConfig::default(), store, Arc::new(fetcher)));
    worker.install().await.unwrap();
    worker
}

/// Text of the first content block of a tool result.
pub(crate) fn output_text(result: &CallToolResult) -> String {
    let content = serde_json::to_value(&result.content[0]).unwrap();
    content
        .get("text")
        .and_then(|v| v.as_str())
        .expect("Expected text field in content")
        .to_string()
}
