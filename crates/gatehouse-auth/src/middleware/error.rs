//! Error response handling for the authentication middleware.
//!
//! Implements `IntoResponse` for [`AuthError`] so handler-level rejections
//! surface as proper HTTP responses. Unauthenticated requests receive a
//! `401` with a `WWW-Authenticate: Basic` challenge; internal faults map to
//! `500` without leaking detail beyond the error message.

use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AuthError;

/// Realm used when a rejection is built without configured state.
const DEFAULT_REALM: &str = "gatehouse";

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Unauthorized { message } => challenge_response(DEFAULT_REALM, message),
            AuthError::Storage { .. }
            | AuthError::Configuration { .. }
            | AuthError::Internal { .. } => {
                let body = json!({
                    "error": "server_error",
                    "message": self.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

/// Builds the `401` challenge response for unauthenticated requests.
///
/// The body never says which pipeline stage failed; only the logs do.
#[must_use]
pub fn challenge_response(realm: &str, message: &str) -> Response {
    let body = json!({
        "error": "unauthorized",
        "message": message,
    });

    let mut headers = HeaderMap::new();
    let challenge = format!("Basic realm=\"{realm}\"");
    if let Ok(value) = HeaderValue::from_str(&challenge) {
        headers.insert(header::WWW_AUTHENTICATE, value);
    }

    (StatusCode::UNAUTHORIZED, headers, Json(body)).into_response()
}
