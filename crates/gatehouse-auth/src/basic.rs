//! Basic Auth credential resolver.
//!
//! Resolves an HTTP `Authorization: Basic <base64>` header into a verified
//! [`Principal`] through five strictly gated stages:
//!
//! 1. Header fetch (shared with every scheme, see [`crate::gate`])
//! 2. Scheme strip - exact, case-sensitive `"Basic "` prefix
//! 3. Base64 decode - standard alphabet (RFC 4648), must be valid UTF-8
//! 4. Credential split - on the FIRST colon; the secret may contain colons
//! 5. Principal lookup + secret verification against the injected store
//!
//! A failure at any stage short-circuits the rest and yields `None`. Store
//! faults (including timeouts surfaced by the backend) are stage-5 failures,
//! never a hang and never an error escaping the resolver.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::scheme::AuthScheme;
use crate::storage::{Principal, PrincipalStore};

/// The scheme token a Basic Auth header must start with, space included.
const SCHEME_PREFIX: &str = "Basic ";

// =============================================================================
// Credentials
// =============================================================================

/// An `(identifier, secret)` pair decoded from a Basic Auth payload.
///
/// Only formed when the decoded payload contains a colon; there is no
/// half-populated state.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Text before the first colon; the login identifier.
    pub identifier: String,

    /// Text after the first colon, verbatim, colons and all.
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secrets stay out of logs.
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Rejection Reason
// =============================================================================

/// Why a request failed to authenticate.
///
/// Carried in tracing fields only; every reason collapses to the same
/// absent-principal outcome so responses never leak which stage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// Absent request, path, or `Authorization` header.
    MissingInput,

    /// Header present but not `Basic `-prefixed.
    MalformedScheme,

    /// Payload is not valid Base64 or does not decode to UTF-8.
    MalformedEncoding,

    /// Decoded payload lacks a colon separator.
    MalformedCredentials,

    /// Lookup found no match or the secret was rejected.
    UnknownOrInvalidPrincipal,

    /// The principal store failed or timed out.
    StoreUnavailable,
}

impl RejectionReason {
    /// Returns the string representation used in tracing fields.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::MalformedScheme => "malformed_scheme",
            Self::MalformedEncoding => "malformed_encoding",
            Self::MalformedCredentials => "malformed_credentials",
            Self::UnknownOrInvalidPrincipal => "unknown_or_invalid_principal",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Basic Authenticator
// =============================================================================

/// The Basic Auth variant of [`AuthScheme`].
///
/// Stateless apart from the injected store handle; safe to share across
/// concurrent requests.
#[derive(Clone)]
pub struct BasicAuthenticator {
    store: Arc<dyn PrincipalStore>,
}

impl BasicAuthenticator {
    /// Creates a resolver backed by the given principal store.
    #[must_use]
    pub fn new(store: Arc<dyn PrincipalStore>) -> Self {
        Self { store }
    }

    /// Stage 2: strips the `"Basic "` scheme prefix.
    ///
    /// The prefix check is exact and case-sensitive, single space included;
    /// any other scheme (`Bearer`, `basic`, ...) fails the stage.
    #[must_use]
    pub fn base64_payload(header: Option<&str>) -> Option<&str> {
        header?.strip_prefix(SCHEME_PREFIX)
    }

    /// Stage 3: decodes the Base64 payload into UTF-8 text.
    ///
    /// Standard alphabet only; an invalid alphabet, bad padding, or a
    /// non-UTF-8 byte sequence all fail the stage.
    #[must_use]
    pub fn decode_payload(payload: Option<&str>) -> Option<String> {
        let bytes = BASE64.decode(payload?).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Stage 4: splits decoded text into credentials on the first colon.
    #[must_use]
    pub fn split_credentials(decoded: Option<&str>) -> Option<Credentials> {
        let (identifier, secret) = decoded?.split_once(':')?;
        Some(Credentials {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        })
    }

    /// Stage 5: looks up the identifier and verifies the secret.
    ///
    /// When several principals share the identifier, the first in
    /// store-returned order is used (see [`PrincipalStore`]). Store errors
    /// collapse to `None`.
    pub async fn principal_from_credentials(&self, credentials: &Credentials) -> Option<Principal> {
        let matches = match self.store.find_by_identifier(&credentials.identifier).await {
            Ok(matches) => matches,
            Err(error) => {
                tracing::warn!(
                    %error,
                    reason = %RejectionReason::StoreUnavailable,
                    "principal lookup failed"
                );
                return None;
            }
        };

        let Some(principal) = matches.into_iter().next() else {
            rejected(RejectionReason::UnknownOrInvalidPrincipal);
            return None;
        };

        match self
            .store
            .verify_secret(&principal.id, &credentials.secret)
            .await
        {
            Ok(true) => Some(principal),
            Ok(false) => {
                rejected(RejectionReason::UnknownOrInvalidPrincipal);
                None
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    reason = %RejectionReason::StoreUnavailable,
                    "secret verification failed"
                );
                None
            }
        }
    }
}

#[async_trait]
impl AuthScheme for BasicAuthenticator {
    /// Chains stages 1-5; the first failing stage wins.
    async fn resolve(&self, request: Option<&Parts>) -> Option<Principal> {
        let Some(header) = self.authorization_header(request) else {
            rejected(RejectionReason::MissingInput);
            return None;
        };

        let Some(payload) = Self::base64_payload(Some(header)) else {
            rejected(RejectionReason::MalformedScheme);
            return None;
        };

        let Some(decoded) = Self::decode_payload(Some(payload)) else {
            rejected(RejectionReason::MalformedEncoding);
            return None;
        };

        let Some(credentials) = Self::split_credentials(Some(decoded.as_str())) else {
            rejected(RejectionReason::MalformedCredentials);
            return None;
        };

        self.principal_from_credentials(&credentials).await
    }
}

fn rejected(reason: RejectionReason) {
    tracing::debug!(%reason, "request unauthenticated");
}

// =============================================================================
// Tests
// =============================================================================
