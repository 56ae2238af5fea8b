//! Signed token construction

use crate::claims::VisaClaim;
use crate::keys::KeyPair;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Invalid issuer: {0}")]
    InvalidIssuer(String),

    #[error("Failed to read signing key {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Audience claim, a single value or a list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Standard claims plus the optional passport extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportClaims {
    /// Subject (sub)
    pub sub: String,

    /// Issuer (iss)
    pub iss: String,

    /// Audience (aud)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Authorized party (azp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,

    /// Space separated scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Expiration time (exp)
    pub exp: i64,

    /// Issued at (iat)
    pub iat: i64,

    /// JWT ID (jti)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Embedded GA4GH visa
    #[serde(rename = "ga4gh_visa_v1", skip_serializing_if = "Option::is_none")]
    pub visa: Option<VisaClaim>,
}

impl PassportClaims {
    /// Create claims carrying only subject, issuer and timestamps
    pub fn new(subject: impl Into<String>, issuer: impl Into<String>, iat: i64, exp: i64) -> Self {
        Self {
            sub: subject.into(),
            iss: issuer.into(),
            aud: None,
            azp: None,
            scope: None,
            exp,
            iat,
            jti: None,
            visa: None,
        }
    }

    pub fn with_jti(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    pub fn with_audience(mut self, aud: Audience) -> Self {
        self.aud = Some(aud);
        self
    }

    /// Set the scope and the authorized party it was granted to
    pub fn with_scope(mut self, scope: impl Into<String>, azp: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self.azp = Some(azp.into());
        self
    }

    pub fn with_visa(mut self, visa: VisaClaim) -> Self {
        self.visa = Some(visa);
        self
    }
}

/// A signed token and the claims it was built from
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// The encoded JWT string
    pub token: String,

    /// The claims (decoded)
    pub claims: PassportClaims,
}

impl SignedToken {
    /// Get the token string
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

/// Signs claims with one RS256 key and a fixed header
pub struct TokenSigner {
    header: Header,
    key: EncodingKey,
}

impl TokenSigner {
    /// Signer for tokens whose header advertises the key set at `jku`
    pub fn new(keypair: &KeyPair, jku: Option<String>) -> Result<Self, TokenError> {
        Ok(Self::from_encoding_key(
            keypair.encoding_key()?,
            keypair.kid(),
            jku,
        ))
    }

    pub fn from_encoding_key(key: EncodingKey, kid: &str, jku: Option<String>) -> Self {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        header.jku = jku;

        Self { header, key }
    }

    pub fn sign(&self, claims: PassportClaims) -> Result<SignedToken, TokenError> {
        let token = self.sign_claims(&claims)?;
        Ok(SignedToken { token, claims })
    }

    /// Sign any serializable claim set
    pub fn sign_claims<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
