//! Core types and shared functionality for sw-cache.
//!
//! This crate provides:
//! - Versioned cache buckets with SQLite and in-memory backends
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{BucketName, CacheDb, CacheStore, CachedResponse, MemoryStore, RequestKey};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
