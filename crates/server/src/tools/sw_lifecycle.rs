//! sw_status and sw_activate tool implementations.

use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::ServiceWorker;
use swcache_core::Error;

/// Output structure for sw_status tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwStatusOutput {
    /// Worker version label.
    pub version: String,
    /// Lifecycle state.
    pub state: String,
    pub general_bucket: String,
    pub accelerated_bucket: String,
    /// Host substrings served cache-first.
    pub accelerated_hosts: Vec<String>,
    /// Known clients, and how many this version controls.
    pub clients: usize,
    pub controlled_clients: usize,
}

/// Implementation of the sw_status tool.
pub async fn status_impl(worker: &ServiceWorker) -> Result<CallToolResult, McpError> {
    let config = worker.policy().config();
    let version = worker.version();
    let state = serde_json::to_value(worker.state().await)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    let clients = worker.clients().len().await;
    let controlled_clients = worker.clients().controlled_by(&version).await;

    let output = SwStatusOutput {
        version,
        state,
        general_bucket: config.general_bucket.to_string(),
        accelerated_bucket: config.accelerated_bucket.to_string(),
        accelerated_hosts: config.accelerated_hosts.clone(),
        clients,
        controlled_clients,
    };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}

/// Implementation of the sw_activate tool.
///
/// Re-runs the activation sweep on a live worker.
pub async fn activate_impl(worker: &ServiceWorker) -> Result<CallToolResult, McpError> {
    let report = worker.activate().await.map_err(Error::from)?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize report: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{StaticFetcher, active_worker, output_text};
    use std::sync::Arc;
    use swcache_client::ActivationReport;
    use swcache_core::MemoryStore;

    #[tokio::test]
    async fn test_status_of_active_worker() {
        let worker = active_worker(Arc::new(MemoryStore::new()), StaticFetcher::ok(b"")).await;
        let result = status_impl(&worker).await.unwrap();
        let output: SwStatusOutput = serde_json::from_str(&output_text(&result)).unwrap();
        assert_eq!(output.state, "activated");
        assert_eq!(output.version, "sahajyog-v1");
        assert_eq!(output.accelerated_bucket, "youtube-resources-v1");
    }

    #[tokio::test]
    async fn test_activate_sweeps_obsolete_buckets() {
        let store = MemoryStore::new();
        let worker = active_worker(Arc::new(store.clone()), StaticFetcher::ok(b"")).await;
        store.create_bucket("sahajyog-v0").await;

        let result = activate_impl(&worker).await.unwrap();
        let report: ActivationReport = serde_json::from_str(&output_text(&result)).unwrap();
        assert_eq!(report.deleted, vec!["sahajyog-v0"]);
        assert_eq!(store.len("sahajyog-v0").await, None);
    }
}
