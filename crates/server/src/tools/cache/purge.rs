//! cache_purge tool implementation.
//!
//! Deletes a whole bucket. Entries never expire individually.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_core::{CacheDb, CacheStore, Error};

/// Parameters for the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeParams {
    /// Name of the bucket to delete, e.g. "youtube-resources-v1".
    pub bucket: String,
}

/// Output from the cache_purge tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CachePurgeOutput {
    pub bucket: String,
    /// Whether the bucket existed.
    pub deleted: bool,
}

/// Implementation of the cache_purge tool.
pub async fn purge_impl(cache: &CacheDb, params: CachePurgeParams) -> Result<CallToolResult, McpError> {
    let bucket = params.bucket.trim();
    if bucket.is_empty() {
        return Err(Error::InvalidInput("bucket must be specified".to_string()).into());
    }

    let deleted = cache.delete_bucket(bucket).await?;
    tracing::info!(bucket, deleted, "bucket purged");

    let output = CachePurgeOutput { bucket: bucket.to_string(), deleted };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::output_text;
    use swcache_core::{CachedResponse, RequestKey};

    async fn seeded() -> CacheDb {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let key = RequestKey::new("GET", "https://i.ytimg.com/thumb.jpg", "");
        let response = CachedResponse {
            url: key.url.clone(),
            status: 200,
            headers: vec![],
            body: b"jpeg".to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        };
        cache.store("youtube-resources-v1", &key, &response).await.unwrap();
        cache
    }

    #[tokio::test]
    async fn test_purge_existing_bucket() {
        let cache = seeded().await;
        let params = CachePurgeParams { bucket: "youtube-resources-v1".to_string() };

        let result = purge_impl(&cache, params).await.unwrap();
        let output: CachePurgeOutput = serde_json::from_str(&output_text(&result)).unwrap();
        assert!(output.deleted);
        assert!(cache.bucket_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_purge_unknown_bucket() {
        let cache = seeded().await;
        let params = CachePurgeParams { bucket: "sahajyog-v0".to_string() };

        let result = purge_impl(&cache, params).await.unwrap();
        let output: CachePurgeOutput = serde_json::from_str(&output_text(&result)).unwrap();
        assert!(!output.deleted);
        assert_eq!(cache.bucket_names().await.unwrap(), vec!["youtube-resources-v1"]);
    }

    #[tokio::test]
    async fn test_purge_no_bucket() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let result = purge_impl(&cache, CachePurgeParams { bucket: "  ".to_string() }).await;
        assert!(result.is_err());
    }
}
