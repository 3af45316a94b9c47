//! Client-side fetch cache worker for sw-cache.
//!
//! This crate provides the network fetcher, the origin classifier and the
//! two caching strategies, and the worker lifecycle that hosts them.

pub mod fetch;
pub mod policy;
pub mod worker;

pub use fetch::{FetchConfig, FetchError, Fetcher, HttpFetcher, Request, Response, ResponseSource};
pub use policy::{CachePolicy, OriginClass, OriginClassifier, PolicyConfig};
pub use worker::{ActivationReport, FetchEvent, ServiceWorker, WorkerError, WorkerState};

#[cfg(test)]
mod testing;
