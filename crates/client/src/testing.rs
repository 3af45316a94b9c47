//! Test doubles shared by the policy and worker tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderValue};
use swcache_core::{CacheStore, CachedResponse, Error, RequestKey};

use crate::fetch::{FetchError, Fetcher, Request, Response, ResponseSource};
use crate::policy::PolicyConfig;

#[derive(Debug, Clone)]
enum Scripted {
    Respond(u16, Bytes),
    Fail,
}

/// Fetcher answering from a URL → outcome table. Unknown URLs fail.
#[derive(Debug, Default)]
pub(crate) struct ScriptedFetcher {
    routes: Mutex<HashMap<String, Scripted>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, url: &str, status: u16, body: &'static [u8]) -> Self {
        self.set_response(url, status, body);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set_response(&self, url: &str, status: u16, body: &'static [u8]) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.to_string(), Scripted::Respond(status, Bytes::from_static(body)));
    }

    /// Make every subsequent fetch of `url` fail at the network layer.
    pub(crate) fn set_offline(&self, url: &str) {
        self.routes.lock().unwrap().insert(url.to_string(), Scripted::Fail);
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: &Request) -> Result<Response, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self.routes.lock().unwrap().get(request.url.as_str()).cloned();
        match outcome {
            Some(Scripted::Respond(status, body)) => {
                let mut headers = HeaderMap::new();
                headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
                Ok(Response {
                    url: Some(request.url.clone()),
                    status: StatusCode::from_u16(status).unwrap(),
                    headers,
                    body,
                    source: ResponseSource::Network,
                })
            }
            Some(Scripted::Fail) | None => Err(FetchError::Other(format!("connection refused: {}", request.url))),
        }
    }
}

/// Store whose every operation fails, like disabled or over-quota storage.
#[derive(Debug, Default)]
pub(crate) struct BrokenStore;

#[async_trait]
impl CacheStore for BrokenStore {
    async fn lookup(&self, _bucket: &str, _key: &RequestKey) -> Result<Option<CachedResponse>, Error> {
        Err(Error::CorruptEntry("storage disabled".into()))
    }

    async fn store(&self, _bucket: &str, _key: &RequestKey, _response: &CachedResponse) -> Result<(), Error> {
        Err(Error::CorruptEntry("quota exceeded".into()))
    }

    async fn bucket_names(&self) -> Result<Vec<String>, Error> {
        Err(Error::CorruptEntry("storage disabled".into()))
    }

    async fn delete_bucket(&self, _bucket: &str) -> Result<bool, Error> {
        Err(Error::CorruptEntry("storage disabled".into()))
    }
}

/// Policy config with per-test bucket names.
pub(crate) fn test_config(tag: &str) -> PolicyConfig {
    PolicyConfig {
        general_bucket: swcache_core::BucketName::new(format!("app-{tag}"), 1),
        accelerated_bucket: swcache_core::BucketName::new(format!("media-{tag}"), 1),
        accelerated_hosts: vec!["youtube.com".into(), "ytimg.com".into(), "googlevideo.com".into()],
        fetch_timeout: Duration::from_secs(5),
        max_entry_bytes: 1024,
    }
}
