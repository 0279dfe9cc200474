//! Credential Store - Persistence abstraction for instance credentials
//!
//! The store is the only shared mutable resource in the gateway. It holds:
//! - The optional cluster admin secret (immutable after construction)
//! - The `InstanceId → InstanceSecret` pairings, plus the reverse index
//!
//! A pairing is either fully present or absent; `register` never leaves
//! one direction without the other.

use crate::error::StoreError;
use crate::model::{InstanceId, InstanceSecret};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Store result type
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential store trait
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Admin secret configured at construction, if any
    fn configured_admin_secret(&self) -> Option<&str>;

    /// Insert a new pairing; `Conflict` if the id or secret is already bound
    async fn register(&self, id: InstanceId, secret: InstanceSecret) -> StoreResult<()>;

    /// Secret bound to an id
    async fn lookup(&self, id: &InstanceId) -> StoreResult<Option<InstanceSecret>>;

    /// Id bound to a secret
    async fn resolve(&self, secret: &str) -> StoreResult<Option<InstanceId>>;

    /// All registered ids, sorted
    async fn instance_ids(&self) -> StoreResult<Vec<InstanceId>>;

    /// Number of registered pairings
    async fn record_count(&self) -> StoreResult<usize>;
}

#[derive(Default)]
struct Records {
    secrets: HashMap<InstanceId, InstanceSecret>,
    owners: HashMap<String, InstanceId>,
}

/// In-memory credential store
pub struct InMemoryCredentialStore {
    admin_secret: Option<String>,
    records: RwLock<Records>,
}

impl InMemoryCredentialStore {
    /// Create a store; `None` leaves the cluster open
    pub fn new(admin_secret: Option<String>) -> Self {
        Self {
            admin_secret,
            records: RwLock::new(Records::default()),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    fn configured_admin_secret(&self) -> Option<&str> {
        self.admin_secret.as_deref()
    }

    async fn register(&self, id: InstanceId, secret: InstanceSecret) -> StoreResult<()> {
        if secret.is_empty() {
            return Err(StoreError::Storage("refusing empty instance secret".into()));
        }

        let mut records = self.records.write();

        // Both checks run before either insert.
        if records.secrets.contains_key(&id) {
            return Err(StoreError::Conflict(format!("instance {} already registered", id)));
        }
        if records.owners.contains_key(secret.as_str()) {
            return Err(StoreError::Conflict("instance secret already bound".into()));
        }

        records.owners.insert(secret.as_str().to_string(), id);
        records.secrets.insert(id, secret);
        Ok(())
    }

    async fn lookup(&self, id: &InstanceId) -> StoreResult<Option<InstanceSecret>> {
        Ok(self.records.read().secrets.get(id).cloned())
    }

    async fn resolve(&self, secret: &str) -> StoreResult<Option<InstanceId>> {
        Ok(self.records.read().owners.get(secret).copied())
    }

    async fn instance_ids(&self) -> StoreResult<Vec<InstanceId>> {
        let mut ids: Vec<_> = self.records.read().secrets.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn record_count(&self) -> StoreResult<usize> {
        Ok(self.records.read().secrets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_and_lookup() {
        let store = InMemoryCredentialStore::new(Some("admin".into()));
        let id = InstanceId::new_v4();
        let secret = InstanceSecret::new("s3cret");

        assert_eq!(store.configured_admin_secret(), Some("admin"));

        store.register(id, secret.clone()).await.unwrap();

        assert_eq!(store.lookup(&id).await.unwrap(), Some(secret));
        assert_eq!(store.resolve("s3cret").await.unwrap(), Some(id));
        assert_eq!(store.record_count().await.unwrap(), 1);
        assert!(store.lookup(&InstanceId::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let store = InMemoryCredentialStore::default();
        let id = InstanceId::new_v4();

        store.register(id, InstanceSecret::new("first")).await.unwrap();
        let err = store.register(id, InstanceSecret::new("second")).await.unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        // Original pairing untouched
        assert_eq!(store.lookup(&id).await.unwrap(), Some(InstanceSecret::new("first")));
        assert!(store.resolve("second").await.unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_same_id_registrations() {
        let store = Arc::new(InMemoryCredentialStore::default());
        let id = InstanceId::new_v4();
        let barrier = Arc::new(tokio::sync::Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    store.register(id, InstanceSecret::new(format!("racer-{}", i))).await
                })
            })
            .collect();

        let mut winners = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => winners += 1,
                Err(StoreError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(store.record_count().await.unwrap(), 1);

        // The surviving secret resolves back to the id
        let secret = store.lookup(&id).await.unwrap().unwrap();
        assert_eq!(store.resolve(secret.as_str()).await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn test_failed_registration_leaves_no_partial_record() {
        let store = InMemoryCredentialStore::default();
        let first = InstanceId::new_v4();
        let second = InstanceId::new_v4();

        store.register(first, InstanceSecret::new("shared")).await.unwrap();

        // Fails on the reverse index after the forward check passed
        let err = store.register(second, InstanceSecret::new("shared")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        assert!(store.lookup(&second).await.unwrap().is_none());
        assert_eq!(store.resolve("shared").await.unwrap(), Some(first));
        assert_eq!(store.instance_ids().await.unwrap(), vec![first]);
    }

    #[tokio::test]
    async fn test_empty_secret_rejected() {
        let store = InMemoryCredentialStore::default();
        let id = InstanceId::new_v4();

        assert!(store.register(id, InstanceSecret::new("")).await.is_err());
        assert_eq!(store.record_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_distinct_registrations() {
        let store = Arc::new(InMemoryCredentialStore::default());

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .register(InstanceId::new_v4(), InstanceSecret::new(format!("secret-{}", i)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.record_count().await.unwrap(), 64);
    }
}
