//! Versioned, bucketed response cache.
//!
//! A bucket is a named collection of request/response pairs. Buckets are
//! created lazily on first write and removed as a whole; entries never
//! expire on their own. Two backends implement [`CacheStore`]:
//!
//! - [`CacheDb`]: SQLite via tokio-rusqlite, WAL mode, automatic migrations
//! - [`MemoryStore`]: process-local maps, used by tests and ephemeral runs

pub mod bucket;
pub mod connection;
pub mod entries;
pub mod key;
pub mod memory;
pub mod migrations;
pub mod store;

pub use crate::Error;

pub use bucket::BucketName;
pub use connection::CacheDb;
pub use entries::{BucketSummary, EntryInfo};
pub use key::{RequestKey, compute_cache_key};
pub use memory::MemoryStore;
pub use store::{CacheStore, CachedResponse};
