//! Cache-related MCP tools.
//!
//! Inspection and maintenance of the SQLite bucket store, independent of
//! the worker's lifecycle.

pub mod buckets;
pub mod get;
pub mod purge;

pub use buckets::buckets_impl;
pub use get::{CacheGetParams, get_impl};
pub use purge::{CachePurgeParams, purge_impl};
