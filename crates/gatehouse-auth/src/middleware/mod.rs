//! HTTP middleware wiring the gate into an axum router.
//!
//! This module provides:
//!
//! - [`AuthState`] - shared scheme + compiled exclusions + realm
//! - [`authenticate`] - request middleware applying the gate and resolver
//! - [`CurrentPrincipal`] - extractor for handlers behind the gate
//! - `IntoResponse` for [`crate::AuthError`]
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use axum::{Router, middleware::from_fn_with_state, routing::get};
//! use gatehouse_auth::{AuthConfig, AuthState, BasicAuthenticator, CurrentPrincipal, authenticate};
//!
//! async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> String {
//!     format!("Hello, {}!", principal.identifier)
//! }
//!
//! let scheme = Arc::new(BasicAuthenticator::new(store));
//! let state = AuthState::from_config(&config, scheme)?;
//!
//! let app = Router::new()
//!     .route("/api/v1/users/me", get(me))
//!     .layer(from_fn_with_state(state, authenticate));
//! ```

pub mod auth;
pub mod error;

pub use auth::{AuthState, CurrentPrincipal, authenticate};
pub use error::challenge_response;
