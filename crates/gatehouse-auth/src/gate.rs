//! Exclusion-path matching.
//!
//! Decides, per request path, whether authentication is required. Paths are
//! compared against a configured list of [`ExclusionPattern`]s; anything not
//! covered by the list requires credentials. Every ambiguous input resolves
//! to "auth required" (fail-secure).

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use axum::http::{header::AUTHORIZATION, request::Parts};
use glob::Pattern;

// =============================================================================
// Exclusion Pattern
// =============================================================================

/// A configured path exempt from authentication.
///
/// Holds the raw string as configured plus its compiled shell-glob pattern
/// (`*` matches any run of characters, `?` one character, `[...]` character
/// classes). Built once at startup and shared read-only across requests.
///
/// Pattern authors should terminate directory-style exclusions with a
/// trailing `/` or a wildcard: request paths are normalized with a trailing
/// separator before glob matching, so `/api/v1/status` alone will not
/// glob-match the normalized `/api/v1/status/`.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    raw: String,
    pattern: Pattern,
}

impl ExclusionPattern {
    /// Compiles an exclusion pattern from its configured string form.
    ///
    /// # Errors
    ///
    /// Returns a [`glob::PatternError`] if the glob syntax is invalid
    /// (e.g. an unclosed character class).
    pub fn new(raw: impl Into<String>) -> Result<Self, glob::PatternError> {
        let raw = raw.into();
        let pattern = Pattern::new(&raw)?;
        Ok(Self { raw, pattern })
    }

    /// Returns the pattern string as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Tests a normalized request path against the compiled glob.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.matches(path)
    }
}

impl FromStr for ExclusionPattern {
    type Err = glob::PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for ExclusionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// =============================================================================
// Gate Operations
// =============================================================================

/// Decides whether a request path requires authentication.
///
/// Contract:
///
/// 1. Absent `path` requires auth: no path means no way to prove exemption.
/// 2. An empty exclusion list requires auth for every path.
/// 3. The path is normalized with a trailing `/` before comparison.
/// 4. Exact-match fast path, evaluated before any glob matching: an entry
///    whose raw configured string equals the literal or the normalized path
///    exempts the request. Raw entries are compared as given, never
///    normalized; only step 5 sees the normalized path.
/// 5. Otherwise each entry's glob is tested against the normalized path;
///    any match exempts the request.
/// 6. No match after exhausting the list requires auth.
///
/// Pure and deterministic; entry order never changes the boolean result,
/// only which entry matches first.
#[must_use]
pub fn requires_auth(path: Option<&str>, exclusions: &[ExclusionPattern]) -> bool {
    let Some(path) = path else {
        return true;
    };

    if exclusions.is_empty() {
        return true;
    }

    let normalized = normalize(path);

    if exclusions
        .iter()
        .any(|e| e.as_str() == path || e.as_str() == normalized)
    {
        return false;
    }

    !exclusions.iter().any(|e| e.matches(&normalized))
}

/// Returns the request's `Authorization` header value verbatim.
///
/// `None` if the request is absent, the header is absent, or the header
/// value is not valid UTF-8. No parsing or validation is performed here.
#[must_use]
pub fn authorization_header(request: Option<&Parts>) -> Option<&str> {
    request?.headers.get(AUTHORIZATION)?.to_str().ok()
}

/// Normalizes a request path by enforcing a trailing separator.
fn normalize(path: &str) -> Cow<'_, str> {
    if path.ends_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("{path}/"))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn patterns(raw: &[&str]) -> Vec<ExclusionPattern> {
        raw.iter()
            .map(|p| ExclusionPattern::new(*p).unwrap())
            .collect()
    }

    #[test]
    fn test_absent_path_requires_auth() {
        assert!(requires_auth(None, &[]));
        assert!(requires_auth(None, &patterns(&["/api/v1/status/"])));
        assert!(requires_auth(None, &patterns(&["*"])));
    }

    #[test]
    fn test_empty_exclusions_require_auth() {
        assert!(requires_auth(Some("/api/v1/status/"), &[]));
        assert!(requires_auth(Some("/"), &[]));
        assert!(requires_auth(Some(""), &[]));
    }

    #[test]
    fn test_exact_match_is_exempt() {
        let excl = patterns(&["/api/v1/status/"]);
        assert!(!requires_auth(Some("/api/v1/status/"), &excl));
    }

    #[test]
    fn test_trailing_separator_normalization() {
        let excl = patterns(&["/api/v1/status/"]);
        assert!(!requires_auth(Some("/api/v1/status"), &excl));
    }

    #[test]
    fn test_unlisted_path_requires_auth() {
        let excl = patterns(&["/api/v1/status/", "/api/v1/unauthorized/"]);
        assert!(requires_auth(Some("/api/v1/users"), &excl));
        assert!(requires_auth(Some("/api/v1/status/extra"), &excl));
    }

    #[test]
    fn test_glob_star_matches() {
        let excl = patterns(&["/api/v1/stat*"]);
        assert!(!requires_auth(Some("/api/v1/stats/"), &excl));
        assert!(!requires_auth(Some("/api/v1/status"), &excl));
        assert!(requires_auth(Some("/api/v1/users/55"), &excl));
    }

    #[test]
    fn test_glob_question_mark_and_class() {
        let excl = patterns(&["/api/v?/status/"]);
        assert!(!requires_auth(Some("/api/v1/status/"), &excl));
        assert!(!requires_auth(Some("/api/v2/status"), &excl));
        assert!(requires_auth(Some("/api/v10/status/"), &excl));

        let excl = patterns(&["/api/v[12]/status/"]);
        assert!(!requires_auth(Some("/api/v1/status/"), &excl));
        assert!(!requires_auth(Some("/api/v2/status/"), &excl));
        assert!(requires_auth(Some("/api/v3/status/"), &excl));
    }

    #[test]
    fn test_match_order_is_irrelevant() {
        let forward = patterns(&["/api/v1/stat*", "/health/"]);
        let reverse = patterns(&["/health/", "/api/v1/stat*"]);
        for path in ["/api/v1/stats/", "/health", "/api/v1/users"] {
            assert_eq!(
                requires_auth(Some(path), &forward),
                requires_auth(Some(path), &reverse),
            );
        }
    }

    #[test]
    fn test_raw_entry_without_trailing_separator() {
        // A bare entry exempts only the literal path; the normalized form
        // does not glob-match it.
        let excl = patterns(&["/api/v1/status"]);
        assert!(!requires_auth(Some("/api/v1/status"), &excl));
        assert!(requires_auth(Some("/api/v1/status/"), &excl));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        assert!(ExclusionPattern::new("/api/v1/[").is_err());
        assert!("/api/v1/[".parse::<ExclusionPattern>().is_err());
    }

    #[test]
    fn test_pattern_display_round_trip() {
        let p = ExclusionPattern::new("/api/v1/stat*").unwrap();
        assert_eq!(p.to_string(), "/api/v1/stat*");
        assert_eq!(p.as_str(), "/api/v1/stat*");
    }

    #[test]
    fn test_authorization_header_extraction() {
        assert_eq!(authorization_header(None), None);

        let (parts, _) = Request::builder()
            .uri("/api/v1/users")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(authorization_header(Some(&parts)), None);

        let (parts, _) = Request::builder()
            .uri("/api/v1/users")
            .header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(
            authorization_header(Some(&parts)),
            Some("Basic dXNlcjpwYXNz")
        );
    }
}
