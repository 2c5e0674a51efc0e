//! Gate configuration.
//!
//! Exclusion patterns arrive as plain strings from configuration and are
//! compiled to [`ExclusionPattern`]s once at startup; after that the list is
//! immutable shared state.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth]
//! enabled = true
//! realm = "gatehouse"
//! excluded_paths = ["/api/v1/status/", "/api/v1/unauthorized/", "/api/v1/forbidden/"]
//! ```

use serde::{Deserialize, Serialize};

use crate::gate::ExclusionPattern;

/// Authentication gate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Enable/disable the gate entirely.
    /// When disabled, all requests pass through unauthenticated.
    pub enabled: bool,

    /// Realm reported in the `WWW-Authenticate` challenge.
    pub realm: String,

    /// Paths exempt from authentication, as raw strings.
    ///
    /// Entries may carry shell-glob wildcards; see [`ExclusionPattern`] for
    /// the trailing-separator rules.
    pub excluded_paths: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            realm: "gatehouse".to_string(),
            excluded_paths: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Compiles the configured exclusion strings into patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidExclusion`] naming the first pattern
    /// that fails to compile.
    pub fn compile_exclusions(&self) -> Result<Vec<ExclusionPattern>, ConfigError> {
        self.excluded_paths
            .iter()
            .map(|raw| {
                ExclusionPattern::new(raw.clone()).map_err(|source| {
                    ConfigError::InvalidExclusion {
                        pattern: raw.clone(),
                        source,
                    }
                })
            })
            .collect()
    }
}

/// Errors raised while validating gate configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An excluded path is not a valid glob pattern.
    #[error("invalid exclusion pattern `{pattern}`: {source}")]
    InvalidExclusion {
        /// The offending pattern as configured.
        pattern: String,
        /// The underlying glob compilation error.
        #[source]
        source: glob::PatternError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert!(config.enabled);
        assert_eq!(config.realm, "gatehouse");
        assert!(config.excluded_paths.is_empty());
        assert!(config.compile_exclusions().unwrap().is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml = r#"
            enabled = true
            realm = "api"
            excluded_paths = ["/api/v1/status/", "/api/v1/stat*"]
        "#;
        let config: AuthConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.realm, "api");
        assert_eq!(config.excluded_paths.len(), 2);

        let compiled = config.compile_exclusions().unwrap();
        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[1].as_str(), "/api/v1/stat*");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AuthConfig = toml::from_str("excluded_paths = [\"/status/\"]").unwrap();
        assert!(config.enabled);
        assert_eq!(config.realm, "gatehouse");
        assert_eq!(config.excluded_paths, vec!["/status/".to_string()]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let config = AuthConfig {
            excluded_paths: vec!["/api/v1/[".to_string()],
            ..AuthConfig::default()
        };
        let err = config.compile_exclusions().unwrap_err();
        assert!(err.to_string().contains("/api/v1/["));
    }
}
