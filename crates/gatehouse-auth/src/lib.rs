//! # gatehouse-auth
//!
//! Pluggable request-authentication gate for axum services.
//!
//! This crate provides:
//! - Exclusion-path matching that decides which request paths are exempt
//!   from authentication
//! - The HTTP Basic Auth credential pipeline (header extraction, Base64
//!   decoding, credential parsing, principal lookup)
//! - A scheme trait so alternative credential mechanisms can plug into the
//!   same gate
//! - Axum middleware wiring the gate into a router
//!
//! ## Overview
//!
//! Every decision is fail-secure: a missing path, a missing header, a
//! malformed payload, or a store fault all resolve to "unauthenticated",
//! never to a partial principal. The exclusion list is immutable
//! configuration shared across requests; the only blocking point is the
//! injected [`PrincipalStore`] lookup.
//!
//! ## Modules
//!
//! - [`config`] - Gate configuration and exclusion-pattern validation
//! - [`error`] - Error types and the HTTP rejection surface
//! - [`gate`] - Exclusion-path matching
//! - [`scheme`] - The `AuthScheme` capability trait
//! - [`basic`] - Basic Auth credential resolver
//! - [`storage`] - Principal record and store trait
//! - [`middleware`] - Axum middleware and extractors

pub mod basic;
pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod scheme;
pub mod storage;

pub use basic::{BasicAuthenticator, Credentials, RejectionReason};
pub use config::{AuthConfig, ConfigError};
pub use error::AuthError;
pub use gate::{ExclusionPattern, requires_auth};
pub use middleware::{AuthState, CurrentPrincipal, authenticate};
pub use scheme::AuthScheme;
pub use storage::{Principal, PrincipalStore};

/// Type alias for authentication results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use gatehouse_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::basic::{BasicAuthenticator, Credentials, RejectionReason};
    pub use crate::config::{AuthConfig, ConfigError};
    pub use crate::error::AuthError;
    pub use crate::gate::{ExclusionPattern, requires_auth};
    pub use crate::middleware::{AuthState, CurrentPrincipal, authenticate};
    pub use crate::scheme::AuthScheme;
    pub use crate::storage::{Principal, PrincipalStore};
}
