//! In-memory [`CacheStore`] for tests and ephemeral runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::key::RequestKey;
use super::store::{CacheStore, CachedResponse};
use crate::Error;

/// Buckets held in process memory. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    buckets: Arc<RwLock<BTreeMap<String, HashMap<String, CachedResponse>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries in `bucket`, or `None` if it does not exist.
    pub async fn len(&self, bucket: &str) -> Option<usize> {
        self.buckets.read().await.get(bucket).map(HashMap::len)
    }

    /// Create an empty bucket, as a page or an earlier worker version would.
    pub async fn create_bucket(&self, bucket: &str) {
        self.buckets.write().await.entry(bucket.to_string()).or_default();
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn lookup(&self, bucket: &str, key: &RequestKey) -> Result<Option<CachedResponse>, Error> {
        let buckets = self.buckets.read().await;
        Ok(buckets.get(bucket).and_then(|entries| entries.get(&key.hash)).cloned())
    }

    async fn store(&self, bucket: &str, key: &RequestKey, response: &CachedResponse) -> Result<(), Error> {
        let mut buckets = self.buckets.write().await;
        buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.hash.clone(), response.clone());
        Ok(())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, Error> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<bool, Error> {
        Ok(self.buckets.write().await.remove(bucket).is_some())
    }
}
