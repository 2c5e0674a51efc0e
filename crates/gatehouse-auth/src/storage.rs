//! Principal record and store trait.
//!
//! Defines the interface the credential resolver queries. Implementations
//! are provided by storage backends (e.g. `gatehouse-auth-memory`); the
//! resolver itself never creates, mutates, or destroys principals.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::AuthResult;

/// Default datetime value for deserialization when the field is missing.
fn default_datetime() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// =============================================================================
// Principal
// =============================================================================

/// An authenticated identity resolved from credentials.
///
/// The resolver treats principals as opaque records owned by the store;
/// secret material never appears on this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Unique identifier for the principal record.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Login identifier presented in credentials (e.g. an email address).
    pub identifier: String,

    /// Display name (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the principal can authenticate.
    ///
    /// Inactive principals are never returned by lookups.
    pub active: bool,

    /// When the principal was created.
    #[serde(default = "default_datetime", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Principal {
    /// Creates a new active principal with the given login identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identifier: identifier.into(),
            name: None,
            active: true,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets whether the principal is active.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Returns `true` if the principal can authenticate.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

// =============================================================================
// Principal Store Trait
// =============================================================================

/// Storage operations for principals.
///
/// The resolver performs a read-only lookup followed by a secret
/// verification; any rate-limiting or audit side effects of verification
/// belong to the implementation, not to the resolver.
///
/// Identifiers SHOULD be unique within a store. When several records share
/// one identifier the resolver uses the first record in store-returned
/// order, so implementations must return matches in a deterministic order.
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    /// Finds all active principals with the given login identifier.
    ///
    /// Returns an empty list when no principal matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails or times out.
    async fn find_by_identifier(&self, identifier: &str) -> AuthResult<Vec<Principal>>;

    /// Verifies a candidate secret against the principal's stored credential.
    ///
    /// Returns `Ok(false)` when the secret does not match or the principal
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails or times out.
    async fn verify_secret(&self, principal_id: &Uuid, candidate: &str) -> AuthResult<bool>;
}

// =============================================================================
// Tests
// =============================================================================
