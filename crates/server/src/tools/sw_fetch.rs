//! sw_fetch tool implementation.
//!
//! Delivers a fetch event to the worker and reports how it was resolved.

use chrono::Utc;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swcache_client::{FetchEvent, OriginClass, Request, ResponseSource, ServiceWorker};
use swcache_core::Error;

/// Input parameters for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchParams {
    /// The URL to request.
    pub url: String,

    /// HTTP method (default: GET). Only GET responses are ever cached.
    #[serde(default = "default_method")]
    pub method: String,

    /// Optional Accept header; part of the cache key.
    #[serde(default)]
    pub accept: Option<String>,

    /// Optional id of the page issuing the request.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Maximum body bytes echoed back in the output (default: 64KB).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_method() -> String {
    "GET".into()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Output structure for sw_fetch tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SwFetchOutput {
    /// The URL requested, after normalization.
    pub url: String,
    /// The URL the response came from, absent for synthesized responses.
    pub final_url: Option<String>,
    /// HTTP status code.
    pub status: u16,
    /// "network", "cache", or "offline".
    pub source: String,
    /// "accelerated" or "default".
    pub origin_class: String,
    /// Content-Type header.
    pub content_type: Option<String>,
    /// Body as text (lossy UTF-8), cut at max_body_bytes.
    pub body: String,
    /// Full body length in bytes.
    pub body_len: usize,
    /// Whether `body` was cut.
    pub truncated: bool,
    /// ISO8601 timestamp of when the response was served.
    pub served_at: String,
}

fn source_label(source: ResponseSource) -> &'static str {
    match source {
        ResponseSource::Network => "network",
        ResponseSource::Cache => "cache",
        ResponseSource::Offline => "offline",
    }
}

fn class_label(class: OriginClass) -> &'static str {
    match class {
        OriginClass::Accelerated => "accelerated",
        OriginClass::Default => "default",
    }
}

/// Implementation of the sw_fetch tool.
pub async fn fetch_impl(worker: &ServiceWorker, params: SwFetchParams) -> Result<CallToolResult, McpError> {
    if params.url.trim().is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let mut request = Request::parse(&params.method, &params.url)?;
    if let Some(accept) = params.accept.as_deref() {
        request = request.with_accept(accept)?;
    }

    let url = request.url.to_string();
    let origin_class = worker.policy().classify(&request);

    let mut event = FetchEvent::new(request);
    if let Some(client_id) = params.client_id {
        event = event.from_client(client_id);
    }

    let response = worker.fetch(event).await.map_err(Error::from)?;

    let body_len = response.body.len();
    let shown = body_len.min(params.max_body_bytes);
    let output = SwFetchOutput {
        url,
        final_url: response.url.as_ref().map(|u| u.to_string()),
        status: response.status.as_u16(),
        source: source_label(response.source).into(),
        origin_class: class_label(origin_class).into(),
        content_type: response.content_type().map(str::to_string),
        body: String::from_utf8_lossy(&response.body[..shown]).into_owned(),
        body_len,
        truncated: shown < body_len,
        served_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    };

    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&output).unwrap_or_default(),
    )]))
}
