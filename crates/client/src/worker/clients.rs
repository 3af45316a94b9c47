//! Page instances (clients) a worker may control.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A page instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    /// Version label of the worker controlling this client, if any.
    pub controller: Option<String>,
}

/// Registry of known clients.
#[derive(Debug, Default)]
pub struct Clients {
    inner: RwLock<HashMap<String, Client>>,
}

impl Clients {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an uncontrolled client. Returns false if it was already known.
    pub async fn register(&self, id: &str) -> bool {
        let mut clients = self.inner.write().await;
        if clients.contains_key(id) {
            return false;
        }
        clients.insert(id.to_string(), Client { id: id.to_string(), controller: None });
        true
    }

    /// Register `id` if needed and mark it controlled by `version`.
    ///
    /// A page that starts after activation is controlled from the start.
    pub async fn control(&self, id: &str, version: &str) {
        let mut clients = self.inner.write().await;
        clients
            .entry(id.to_string())
            .or_insert_with(|| Client { id: id.to_string(), controller: None })
            .controller = Some(version.to_string());
    }

    /// Take control of every registered client. Returns how many changed
    /// controller.
    pub async fn claim(&self, version: &str) -> usize {
        let mut clients = self.inner.write().await;
        let mut claimed = 0;
        for client in clients.values_mut() {
            if client.controller.as_deref() != Some(version) {
                client.controller = Some(version.to_string());
                claimed += 1;
            }
        }
        claimed
    }

    pub async fn get(&self, id: &str) -> Option<Client> {
        self.inner.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn controlled_by(&self, version: &str) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|c| c.controller.as_deref() == Some(version))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let clients = Clients::new();
        assert!(clients.register("tab-1").await);
        assert!(!clients.register("tab-1").await);
        assert_eq!(clients.len().await, 1);
        assert_eq!(clients.get("tab-1").await.unwrap().controller, None);
    }

    #[tokio::test]
    async fn test_claim_takes_over_all() {
        let clients = Clients::new();
        clients.register("tab-1").await;
        clients.control("tab-2", "sahajyog-v1").await;

        assert_eq!(clients.claim("sahajyog-v2").await, 2);
        assert_eq!(clients.controlled_by("sahajyog-v2").await, 2);
        assert_eq!(clients.claim("sahajyog-v2").await, 0);
    }
}
