//! Intercepted request.

use reqwest::Method;
use reqwest::header::{self, HeaderMap, HeaderValue};
use swcache_core::{Error, RequestKey};
use url::Url;

use super::url::parse_request_url;

/// A request as seen by the worker.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: HeaderMap::new() }
    }

    /// Build a request from untrusted method and URL strings.
    pub fn parse(method: &str, url: &str) -> Result<Self, Error> {
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| Error::InvalidInput(format!("invalid method: {method}")))?;
        let url = parse_request_url(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        Ok(Self::new(method, url))
    }

    /// Set the `Accept` header.
    pub fn with_accept(mut self, accept: &str) -> Result<Self, Error> {
        let value =
            HeaderValue::from_str(accept).map_err(|_| Error::InvalidInput(format!("invalid accept header: {accept}")))?;
        self.headers.insert(header::ACCEPT, value);
        Ok(self)
    }

    /// Only `GET` responses may be stored in a bucket.
    pub fn is_cacheable(&self) -> bool {
        self.method == Method::GET
    }

    /// Identity of this request within a bucket.
    ///
    /// The `Accept` header varies the key: the same URL negotiated to a
    /// different representation is a different entry.
    pub fn cache_key(&self) -> RequestKey {
        let vary = self
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        RequestKey::new(self.method.as_str(), self.url.as_str(), vary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let request = Request::parse("get", "https://i.ytimg.com/thumb.jpg").unwrap();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url.as_str(), "https://i.ytimg.com/thumb.jpg");
        assert!(request.is_cacheable());
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Request::parse("GE T", "https://example.com"), Err(Error::InvalidInput(_))));
        assert!(matches!(Request::parse("GET", "ftp://example.com"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_post_not_cacheable() {
        let request = Request::parse("POST", "https://www.youtube.com/youtubei/v1/log_event").unwrap();
        assert!(!request.is_cacheable());
    }

    #[test]
    fn test_cache_key_varies_on_accept() {
        let plain = Request::parse("GET", "https://i.ytimg.com/thumb.jpg").unwrap();
        let webp = plain.clone().with_accept("image/webp").unwrap();
        assert_ne!(plain.cache_key().hash, webp.cache_key().hash);
        assert_eq!(webp.cache_key().vary, "image/webp");
    }

    #[test]
    fn test_cache_key_ignores_fragment() {
        let a = Request::parse("GET", "https://i.ytimg.com/thumb.jpg#a").unwrap();
        let b = Request::parse("GET", "https://i.ytimg.com/thumb.jpg").unwrap();
        assert_eq!(a.cache_key(), b.cache_key());
    }
}
