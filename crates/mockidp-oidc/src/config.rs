//! Mock provider configuration

use crate::token::TokenError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Issuer used when `ISSUER_URL` is not set
pub const DEFAULT_ISSUER_URL: &str = "http://localhost:8000";

/// Mock OIDC provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OidcConfig {
    /// Issuer base URL without a trailing slash (e.g., "http://localhost:8000")
    pub issuer: String,

    /// JWKS endpoint path
    pub jwks_endpoint: String,
}

impl Default for OidcConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER_URL.to_string(),
            jwks_endpoint: "/jwk".to_string(),
        }
    }
}

impl OidcConfig {
    /// Create a new config with a custom issuer
    pub fn with_issuer(issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();
        Self {
            issuer: issuer.trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Create a config from a user-supplied issuer, rejecting anything that
    /// is not an absolute http(s) URL.
    pub fn parse(issuer: &str) -> Result<Self, TokenError> {
        let url =
            Url::parse(issuer).map_err(|e| TokenError::InvalidIssuer(format!("{issuer}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TokenError::InvalidIssuer(format!(
                "{issuer}: scheme must be http or https"
            )));
        }
        Ok(Self::with_issuer(issuer))
    }

    /// Get the full URL for an endpoint
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.issuer, path)
    }

    /// URL of the key set, also used as the `jku` token header
    pub fn jwks_uri(&self) -> String {
        self.endpoint_url(&self.jwks_endpoint)
    }

    /// Value of the `iss` claim; the issuer URL with a trailing slash
    pub fn token_issuer(&self) -> String {
        format!("{}/", self.issuer)
    }
}
