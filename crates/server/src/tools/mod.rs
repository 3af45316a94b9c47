//! MCP tool implementations.
//!
//! This module contains all tools exposed by the sw-cache server.

pub mod cache;
pub mod sw_fetch;
pub mod sw_lifecycle;

#[cfg(test)]
pub(crate) mod testing;

pub use sw_fetch::{SwFetchParams, fetch_impl};
pub use sw_lifecycle::{activate_impl, status_impl};
