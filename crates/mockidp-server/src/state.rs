//! Application state

use mockidp_oidc::config::OidcConfig;
use mockidp_oidc::factory::TokenFactory;
use mockidp_oidc::token::TokenError;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Issuer configuration
    pub config: Arc<OidcConfig>,

    /// Key pair and pre-signed tokens, immutable after startup
    pub tokens: Arc<TokenFactory>,
}

impl AppState {
    /// Generate the key pair and sign the token catalogue
    pub fn new(config: OidcConfig) -> Result<Self, TokenError> {
        let tokens = TokenFactory::new(&config)?;
        Ok(Self::with_tokens(config, Arc::new(tokens)))
    }

    /// Build state around an already signed catalogue
    pub fn with_tokens(config: OidcConfig, tokens: Arc<TokenFactory>) -> Self {
        Self {
            config: Arc::new(config),
            tokens,
        }
    }
}
