//! Mock GA4GH passport provider
//!
//! Key material, visa claims and the fixed catalogue of signed tokens served
//! by the mock OIDC endpoints.

pub mod claims;
pub mod config;
pub mod discovery;
pub mod factory;
pub mod keys;
pub mod sign;
pub mod token;

pub use claims::{Asserter, VisaClaim};
pub use config::OidcConfig;
pub use discovery::DiscoveryDocument;
pub use factory::TokenFactory;
pub use keys::{Jwk, JwkSet, KeyPair};
pub use token::{PassportClaims, SignedToken, TokenError};
