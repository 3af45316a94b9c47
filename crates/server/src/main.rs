//! sw-cache server entry point.
//!
//! Loads configuration, opens the bucket store, installs the worker, and
//! serves MCP on stdio. Logging goes to stderr to avoid interfering with the
//! JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use swcache_client::{CachePolicy, FetchConfig, HttpFetcher, PolicyConfig, ServiceWorker};
use swcache_core::{AppConfig, CacheDb};
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    let cache = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("failed to open cache database at {}", config.db_path.display()))?;
    let fetcher = HttpFetcher::new(FetchConfig::from_app(&config))?;

    let policy = CachePolicy::new(PolicyConfig::from_app(&config), Arc::new(cache.clone()), Arc::new(fetcher));
    let worker = Arc::new(ServiceWorker::new(policy));
    let report = worker.install().await?;
    tracing::info!(
        version = %report.version,
        deleted = ?report.deleted,
        failed = ?report.failed,
        "Starting sw-cache server on stdio transport"
    );

    let handler = handler::SwCacheServer::new(worker, cache);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
