//! Responses returned to the page.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use swcache_core::CachedResponse;

/// Body of the synthesized failure response.
pub const OFFLINE_BODY: &str = "Offline";

/// Where a response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Network,
    Cache,
    /// Synthesized by the worker because nothing else was available.
    Offline,
}

/// A response handed back for an intercepted request.
#[derive(Debug, Clone)]
pub struct Response {
    /// Final URL after redirects; `None` when synthesized.
    pub url: Option<url::Url>,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
    pub source: ResponseSource,
}

impl Response {
    /// The 503 `Offline` response: plain body, no headers.
    pub fn offline() -> Self {
        Self {
            url: None,
            status: StatusCode::SERVICE_UNAVAILABLE,
            headers: HeaderMap::new(),
            body: Bytes::from_static(OFFLINE_BODY.as_bytes()),
            source: ResponseSource::Offline,
        }
    }

    /// Only 200 responses are written to a bucket.
    pub fn is_storable(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Snapshot for storage.
    pub fn to_cached(&self) -> CachedResponse {
        CachedResponse {
            url: self.url.as_ref().map(url::Url::to_string).unwrap_or_default(),
            status: self.status.as_u16(),
            headers: self
                .headers
                .iter()
                .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.to_string(), v.to_string())))
                .collect(),
            body: self.body.to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Rebuild a response from a stored snapshot.
    ///
    /// Header pairs that no longer parse are dropped rather than failing the
    /// whole entry.
    pub fn from_cached(cached: CachedResponse) -> Self {
        let mut headers = HeaderMap::with_capacity(cached.headers.len());
        for (name, value) in &cached.headers {
            if let (Ok(name), Ok(value)) = (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
                headers.append(name, value);
            }
        }

        Self {
            url: url::Url::parse(&cached.url).ok(),
            status: StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK),
            headers,
            body: Bytes::from(cached.body),
            source: ResponseSource::Cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_response() {
        let response = Response::offline();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(&response.body[..], b"Offline");
        assert!(response.headers.is_empty());
        assert_eq!(response.source, ResponseSource::Offline);
        assert!(!response.is_storable());
    }

    #[test]
    fn test_cached_snapshot_restores() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/jpeg"));
        headers.append(header::VARY, HeaderValue::from_static("Accept"));
        headers.append(header::VARY, HeaderValue::from_static("Origin"));
        let original = Response {
            url: Some(url::Url::parse("https://i.ytimg.com/thumb.jpg").unwrap()),
            status: StatusCode::OK,
            headers,
            body: Bytes::from_static(b"\xff\xd8jpeg"),
            source: ResponseSource::Network,
        };

        let restored = Response::from_cached(original.to_cached());
        assert_eq!(restored.status, original.status);
        assert_eq!(restored.body, original.body);
        assert_eq!(restored.headers, original.headers);
        assert_eq!(restored.url, original.url);
        assert_eq!(restored.source, ResponseSource::Cache);
        assert_eq!(restored.content_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_from_cached_drops_bad_headers() {
        let cached = CachedResponse {
            url: "https://i.ytimg.com/thumb.jpg".into(),
            status: 200,
            headers: vec![("bad header".into(), "x".into()), ("etag".into(), "\"abc\"".into())],
            body: Vec::new(),
            stored_at: "2024-01-01T00:00:00Z".into(),
        };
        let response = Response::from_cached(cached);
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers.get(header::ETAG).unwrap(), "\"abc\"");
    }
}
