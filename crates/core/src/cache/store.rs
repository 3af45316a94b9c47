//! The Cache Store abstraction shared by the policy engine and its backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::key::RequestKey;
use crate::Error;

/// A captured response snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CachedResponse {
    /// URL the response was served from (after redirects).
    pub url: String,
    pub status: u16,
    /// Header name/value pairs in received order.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// RFC 3339 capture time. Informational; entries do not expire.
    pub stored_at: String,
}

/// Persistent, versioned key-value store of request/response pairs.
///
/// Implementations must tolerate concurrent reads and writes; concurrent
/// writes to the same key resolve last-write-wins.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Look up `key` in `bucket`. A missing bucket is a miss, not an error,
    /// and is not created.
    async fn lookup(&self, bucket: &str, key: &RequestKey) -> Result<Option<CachedResponse>, Error>;

    /// Store `response` under `key`, creating `bucket` if needed.
    async fn store(&self, bucket: &str, key: &RequestKey, response: &CachedResponse) -> Result<(), Error>;

    /// Names of all existing buckets.
    async fn bucket_names(&self) -> Result<Vec<String>, Error>;

    /// Delete a bucket and all its entries. Returns whether it existed.
    async fn delete_bucket(&self, bucket: &str) -> Result<bool, Error>;
}
