//! Worker lifecycle: install, activate, and fetch dispatch.
//!
//! ```text
//! Parsed ──install──▶ Installing ──skip waiting──▶ Installed ──▶ Activating ──▶ Activated
//! any live state ──retire──▶ Redundant
//! ```
//!
//! Activation deletes every bucket that is not one of the current version's
//! two buckets and claims all known clients, so a version bump takes effect
//! without a page reload. Only an activated worker intercepts fetches.
//! Re-activating a live worker repeats the sweep without leaving
//! `Activated`, so dispatch is never interrupted.

pub mod clients;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::fetch::{Request, Response};
use crate::policy::CachePolicy;

pub use clients::{Client, Clients};

/// Worker lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    Redundant,
}

fn is_valid_transition(from: WorkerState, to: WorkerState) -> bool {
    use WorkerState::*;
    match (from, to) {
        (Redundant, _) => false,
        (_, Redundant) => true,
        (Parsed, Installing) | (Installing, Installed) | (Installed, Activating) | (Activating, Activated) => true,
        _ => false,
    }
}

/// Worker lifecycle errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorkerError {
    #[error("worker is not active (state: {0:?})")]
    NotActive(WorkerState),

    #[error("invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition { from: WorkerState, to: WorkerState },
}

impl From<WorkerError> for swcache_core::Error {
    fn from(err: WorkerError) -> Self {
        swcache_core::Error::WorkerState(err.to_string())
    }
}

/// Outcome of an activation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationReport {
    /// Version label (the general bucket name).
    pub version: String,
    pub deleted: Vec<String>,
    /// The subset of `deleted` that were earlier versions of a current bucket.
    pub superseded: Vec<String>,
    pub retained: Vec<String>,
    /// Obsolete buckets whose deletion failed; retried on next activation.
    pub failed: Vec<String>,
    pub claimed_clients: usize,
}

/// An intercepted request and the page it came from.
#[derive(Debug, Clone)]
pub struct FetchEvent {
    pub request: Request,
    pub client_id: Option<String>,
}

impl FetchEvent {
    pub fn new(request: Request) -> Self {
        Self { request, client_id: None }
    }

    pub fn from_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// One version of the fetch cache worker.
pub struct ServiceWorker {
    policy: CachePolicy,
    state: RwLock<WorkerState>,
    clients: Clients,
}

impl ServiceWorker {
    pub fn new(policy: CachePolicy) -> Self {
        Self { policy, state: RwLock::new(WorkerState::Parsed), clients: Clients::new() }
    }

    /// Version label; the general bucket name.
    pub fn version(&self) -> String {
        self.policy.config().general_bucket.to_string()
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn clients(&self) -> &Clients {
        &self.clients
    }

    async fn transition(&self, to: WorkerState) -> Result<(), WorkerError> {
        let mut state = self.state.write().await;
        let from = *state;
        if !is_valid_transition(from, to) {
            return Err(WorkerError::InvalidTransition { from, to });
        }
        *state = to;
        tracing::info!(version = %self.version(), ?from, ?to, "worker state change");
        Ok(())
    }

    /// Handle the install signal.
    ///
    /// There is no per-version migration to wait for, so the worker skips
    /// the waiting phase and activates immediately.
    pub async fn install(&self) -> Result<ActivationReport, WorkerError> {
        self.transition(WorkerState::Installing).await?;
        self.transition(WorkerState::Installed).await?;
        tracing::debug!(version = %self.version(), "skipping waiting phase");
        self.activate().await
    }

    /// Handle the activate signal: delete obsolete buckets, claim clients.
    ///
    /// On a worker that is already active this only repeats the sweep and
    /// the claim; the state stays `Activated` and fetches keep flowing.
    pub async fn activate(&self) -> Result<ActivationReport, WorkerError> {
        let live = self.state().await == WorkerState::Activated;
        if !live {
            self.transition(WorkerState::Activating).await?;
        }

        let mut report = self.sweep_buckets().await;
        report.claimed_clients = self.clients.claim(&report.version).await;

        if !live {
            self.transition(WorkerState::Activated).await?;
        }
        tracing::info!(
            version = %report.version,
            deleted = report.deleted.len(),
            claimed = report.claimed_clients,
            "worker activated"
        );
        Ok(report)
    }

    async fn sweep_buckets(&self) -> ActivationReport {
        let config = self.policy.config();
        let mut report = ActivationReport { version: self.version(), ..Default::default() };
        let store = self.policy.store();

        let names = match store.bucket_names().await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "could not enumerate buckets; skipping cleanup");
                return report;
            }
        };

        for name in names {
            if config.is_current(&name) {
                report.retained.push(name);
                continue;
            }
            let superseded =
                config.general_bucket.is_older_sibling(&name) || config.accelerated_bucket.is_older_sibling(&name);
            match store.delete_bucket(&name).await {
                Ok(_) => {
                    tracing::info!(bucket = %name, superseded, "deleted obsolete bucket");
                    if superseded {
                        report.superseded.push(name.clone());
                    }
                    report.deleted.push(name);
                }
                Err(e) => {
                    tracing::warn!(bucket = %name, error = %e, "failed to delete obsolete bucket");
                    report.failed.push(name);
                }
            }
        }

        report
    }

    /// Handle a fetch signal.
    ///
    /// # Errors
    ///
    /// Returns `WorkerError::NotActive` unless the worker is activated; the
    /// host should then fetch on its own. The issuing page is still
    /// registered, uncontrolled, so the next activation claims it. Once
    /// dispatched, a fetch always yields a response.
    pub async fn fetch(&self, event: FetchEvent) -> Result<Response, WorkerError> {
        let state = self.state().await;
        if state != WorkerState::Activated {
            if let Some(client_id) = &event.client_id
                && state != WorkerState::Redundant
            {
                self.clients.register(client_id).await;
            }
            return Err(WorkerError::NotActive(state));
        }

        if let Some(client_id) = &event.client_id {
            self.clients.control(client_id, &self.version()).await;
        }

        Ok(self.policy.handle(&event.request).await)
    }

    /// Mark this worker replaced. It stops intercepting fetches.
    pub async fn retire(&self) -> Result<(), WorkerError> {
        self.transition(WorkerState::Redundant).await
    }
}
