//! # gatehouse-auth-memory
//!
//! In-memory [`PrincipalStore`] backend for `gatehouse-auth`.
//!
//! Intended for tests, demos, and small deployments. Secrets are compared
//! with plain equality: hashing policy belongs to real backends, not to the
//! resolver or to this reference store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use gatehouse_auth::{AuthResult, Principal, PrincipalStore};

/// A principal record plus its secret, as held by the store.
#[derive(Debug, Clone)]
struct StoredPrincipal {
    principal: Principal,
    secret: String,
}

/// In-memory principal store.
///
/// Records are bucketed by login identifier; insertion order within a
/// bucket is preserved so "first match" is deterministic. Identifiers
/// SHOULD be unique; multiple records per identifier are tolerated only to
/// honor the store contract.
#[derive(Debug, Default)]
pub struct InMemoryPrincipalStore {
    buckets: RwLock<HashMap<String, Vec<StoredPrincipal>>>,
}

impl InMemoryPrincipalStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a principal with its secret.
    pub async fn insert(&self, principal: Principal, secret: impl Into<String>) {
        let mut buckets = self.buckets.write().await;
        let bucket = buckets.entry(principal.identifier.clone()).or_default();
        if !bucket.is_empty() {
            tracing::warn!(
                identifier = %principal.identifier,
                "duplicate identifier in principal store"
            );
        }
        bucket.push(StoredPrincipal {
            principal,
            secret: secret.into(),
        });
    }

    /// Removes a principal by record id. Returns `true` if a record was
    /// removed.
    pub async fn remove(&self, principal_id: &Uuid) -> bool {
        let mut buckets = self.buckets.write().await;
        let mut removed = false;
        buckets.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|stored| &stored.principal.id != principal_id);
            removed |= bucket.len() != before;
            !bucket.is_empty()
        });
        removed
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.buckets.read().await.values().map(Vec::len).sum()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PrincipalStore for InMemoryPrincipalStore {
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Vec<Principal>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(identifier)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|stored| stored.principal.is_active())
                    .map(|stored| stored.principal.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn verify_secret(&self, principal_id: &Uuid, candidate: &str) -> AuthResult<bool> {
        let buckets = self.buckets.read().await;
        Ok(buckets.values().flatten().any(|stored| {
            &stored.principal.id == principal_id && stored.secret == candidate
        }))
    }
}
