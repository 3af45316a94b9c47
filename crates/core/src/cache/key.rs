//! Request identity used as the cache key.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request: method, URL, and vary header values.
pub fn compute_cache_key(method: &str, url: &str, vary_headers: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hasher.update(b"\n");
    hasher.update(vary_headers.as_bytes());
    hex::encode(hasher.finalize())
}

/// Whether `hash` has the shape of a key produced by [`compute_cache_key`].
pub fn is_valid_hash(hash: &str) -> bool {
    hash.len() == 64 && hash.chars().all(|c| c.is_ascii_hexdigit())
}

/// The identity of a request inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestKey {
    pub method: String,
    pub url: String,
    pub vary: String,
    pub hash: String,
}

impl RequestKey {
    pub fn new(method: &str, url: &str, vary: &str) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            url: url.to_string(),
            vary: vary.to_string(),
            hash: compute_cache_key(method, url, vary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_stability() {
        let hash1 = compute_cache_key("GET", "https://i.ytimg.com/thumb.jpg", "");
        let hash2 = compute_cache_key("get", "https://i.ytimg.com/thumb.jpg", "");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_different_method() {
        let get = compute_cache_key("GET", "https://example.com/", "");
        let head = compute_cache_key("HEAD", "https://example.com/", "");
        assert_ne!(get, head);
    }

    #[test]
    fn test_hash_different_vary() {
        let hash1 = compute_cache_key("GET", "https://example.com/", "image/webp");
        let hash2 = compute_cache_key("GET", "https://example.com/", "image/avif");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_format() {
        let hash = compute_cache_key("GET", "https://example.com/", "");
        assert!(is_valid_hash(&hash));
        assert!(!is_valid_hash("abc"));
        assert!(!is_valid_hash(&"z".repeat(64)));
    }

    #[test]
    fn test_request_key_normalizes_method() {
        let key = RequestKey::new("get", "https://example.com/", "");
        assert_eq!(key.method, "GET");
        assert_eq!(key.hash, compute_cache_key("GET", "https://example.com/", ""));
    }
}
