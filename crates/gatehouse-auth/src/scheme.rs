//! The `AuthScheme` capability trait.
//!
//! Path exclusion and header extraction are shared by every credential
//! mechanism, so they ship as provided methods; a scheme only supplies
//! [`AuthScheme::resolve`]. [`crate::basic::BasicAuthenticator`] is the
//! Basic Auth variant; token or session schemes implement the same trait
//! and plug into the same middleware.

use async_trait::async_trait;
use axum::http::request::Parts;

use crate::gate::{self, ExclusionPattern};
use crate::storage::Principal;

/// A pluggable authentication scheme.
///
/// Object-safe: the middleware holds an `Arc<dyn AuthScheme>`.
#[async_trait]
pub trait AuthScheme: Send + Sync {
    /// Decides whether a request path requires authentication.
    ///
    /// Delegates to [`gate::requires_auth`]; schemes normally keep this
    /// default so all schemes share one exclusion semantics.
    fn requires_auth(&self, path: Option<&str>, exclusions: &[ExclusionPattern]) -> bool {
        gate::requires_auth(path, exclusions)
    }

    /// Returns the request's `Authorization` header value verbatim.
    fn authorization_header<'a>(&self, request: Option<&'a Parts>) -> Option<&'a str> {
        gate::authorization_header(request)
    }

    /// Resolves the request's credentials into a principal.
    ///
    /// Returns `None` for any failure: missing or malformed credentials,
    /// unknown principal, rejected secret, or an unavailable store. Never
    /// returns a partial principal.
    async fn resolve(&self, request: Option<&Parts>) -> Option<Principal>;
}
