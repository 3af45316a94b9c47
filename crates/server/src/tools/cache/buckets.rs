//! cache_buckets tool implementation.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_core::cache::BucketSummary;
use swcache_core::{CacheDb, Error};

/// Output from the cache_buckets tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheBucketsOutput {
    pub buckets: Vec<BucketSummary>,
}

/// Implementation of the cache_buckets tool.
pub async fn buckets_impl(cache: &CacheDb) -> Result<CallToolResult, McpError> {
    let buckets = cache.list_buckets().await?;
    let json = serde_json::to_string_pretty(&CacheBucketsOutput { buckets })
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
