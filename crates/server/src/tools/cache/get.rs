//! cache_get tool implementation.
//!
//! Looks up stored entries by request key hash.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_core::cache::EntryInfo;
use swcache_core::{CacheDb, Error};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// The request key hash (64 hex characters).
    pub key: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    /// Matching entries, one per bucket holding the key.
    pub entries: Vec<EntryInfo>,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(cache: &CacheDb, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let entries = cache.entries_by_hash(params.key.trim()).await?;
    if entries.is_empty() {
        return Err(Error::CacheMiss(params.key).into());
    }

    let json = serde_json::to_string_pretty(&CacheGetOutput { entries })
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize entries: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::output_text;
    use swcache_core::{CacheStore, CachedResponse, RequestKey};

    #[tokio::test]
    async fn test_get_impl_malformed_key() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let result = get_impl(&cache, CacheGetParams { key: "nonexistent".to_string() }).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_impl_missing() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let key = RequestKey::new("GET", "https://i.ytimg.com/none.jpg", "");
        let result = get_impl(&cache, CacheGetParams { key: key.hash }).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_impl_found() {
        let cache = CacheDb::open_in_memory().await.unwrap();
        let key = RequestKey::new("GET", "https://i.ytimg.com/thumb.jpg", "");
        let response = CachedResponse {
            url: key.url.clone(),
            status: 200,
            headers: vec![("content-type".into(), "image/jpeg".into())],
            body: b"jpeg".to_vec(),
            stored_at: chrono::Utc::now().to_rfc3339(),
        };
        cache.store("youtube-resources-v1", &key, &response).await.unwrap();

        let result = get_impl(&cache, CacheGetParams { key: key.hash.clone() }).await.unwrap();
        let output: CacheGetOutput = serde_json::from_str(&output_text(&result)).unwrap();
        assert_eq!(output.entries.len(), 1);
        assert_eq!(output.entries[0].url, "https://i.ytimg.com/thumb.jpg");
        assert_eq!(output.entries[0].content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(output.entries[0].body_len, 4);
    }
}
