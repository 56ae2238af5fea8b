//! OIDC Discovery document

use crate::config::OidcConfig;
use serde::{Deserialize, Serialize};

/// The subset of the OpenID Provider Configuration consumers of the mock read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryDocument {
    /// JWKS URI
    pub jwks_uri: String,
}

impl DiscoveryDocument {
    /// Create a discovery document from config
    pub fn from_config(config: &OidcConfig) -> Self {
        Self {
            jwks_uri: config.jwks_uri(),
        }
    }
}
