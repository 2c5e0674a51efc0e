//! Request authentication middleware and extractors.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::config::{AuthConfig, ConfigError};
use crate::error::AuthError;
use crate::gate::ExclusionPattern;
use crate::scheme::AuthScheme;
use crate::storage::Principal;

use super::error::challenge_response;

// =============================================================================
// Auth State
// =============================================================================

/// State shared by the authentication middleware.
///
/// The exclusion list is compiled once from configuration and never mutated
/// afterwards; concurrent requests read it without coordination.
#[derive(Clone)]
pub struct AuthState {
    /// The credential scheme applied to protected paths.
    pub scheme: Arc<dyn AuthScheme>,

    /// Compiled exclusion patterns.
    pub exclusions: Arc<[ExclusionPattern]>,

    /// Realm reported in the `WWW-Authenticate` challenge.
    pub realm: String,

    /// When `false`, every request passes through unauthenticated.
    pub enabled: bool,
}

impl AuthState {
    /// Creates auth state with an explicit exclusion list.
    #[must_use]
    pub fn new(scheme: Arc<dyn AuthScheme>, exclusions: Vec<ExclusionPattern>) -> Self {
        Self {
            scheme,
            exclusions: exclusions.into(),
            realm: "gatehouse".to_string(),
            enabled: true,
        }
    }

    /// Creates auth state from configuration, compiling its exclusions.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any configured pattern fails to compile.
    pub fn from_config(config: &AuthConfig, scheme: Arc<dyn AuthScheme>) -> Result<Self, ConfigError> {
        Ok(Self {
            scheme,
            exclusions: config.compile_exclusions()?.into(),
            realm: config.realm.clone(),
            enabled: config.enabled,
        })
    }

    /// Sets the challenge realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }
}

// =============================================================================
// Middleware
// =============================================================================

/// Axum middleware applying the gate and the credential pipeline.
///
/// Exempt paths pass through untouched. Protected paths go through the
/// scheme's resolver; on success the [`Principal`] is inserted as a request
/// extension for [`CurrentPrincipal`], on failure the client receives the
/// `401` challenge. Use with [`axum::middleware::from_fn_with_state`].
pub async fn authenticate(
    State(state): State<AuthState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.enabled {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    if !state.scheme.requires_auth(Some(&path), &state.exclusions) {
        tracing::debug!(%path, "path exempt from authentication");
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    match state.scheme.resolve(Some(&parts)).await {
        Some(principal) => {
            tracing::debug!(
                %path,
                identifier = %principal.identifier,
                "request authenticated"
            );
            parts.extensions.insert(principal);
            next.run(Request::from_parts(parts, body)).await
        }
        None => challenge_response(&state.realm, "authentication required"),
    }
}

// =============================================================================
// Current Principal Extractor
// =============================================================================

/// Extractor for the principal resolved by [`authenticate`].
///
/// Rejects with `401` when used on a route the middleware never
/// authenticated (an excluded path, or a router without the layer).
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| AuthError::unauthorized("no authenticated principal"))
    }
}
