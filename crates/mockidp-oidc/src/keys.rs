//! RSA signing key and its JSON Web Key representation

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{Algorithm, EncodingKey};
use rand::rngs::OsRng;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};

use crate::token::TokenError;

/// Key identifier placed in token headers and in the key set
pub const KEY_ID: &str = "rsa1";

const KEY_BITS: usize = 2048;

/// The provider's single RSA key pair
#[derive(Clone)]
pub struct KeyPair {
    kid: String,
    private_key: RsaPrivateKey,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("kid", &self.kid)
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a fresh 2048-bit key pair (public exponent 65537)
    pub fn generate() -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::new(&mut OsRng, KEY_BITS)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;

        tracing::debug!(kid = KEY_ID, bits = KEY_BITS, "Generated RSA signing key");

        Ok(Self::from_private_key(private_key))
    }

    /// Wrap an existing private key under the provider's key id
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        Self {
            kid: KEY_ID.to_string(),
            private_key,
        }
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// PKCS#8 PEM encoding of the private key
    pub fn private_key_pem(&self) -> Result<String, TokenError> {
        let pem = self
            .private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGeneration(e.to_string()))?;
        Ok(pem.to_string())
    }

    /// Signing key for `jsonwebtoken`
    pub fn encoding_key(&self) -> Result<EncodingKey, TokenError> {
        let pem = self.private_key_pem()?;
        EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Public half of the key pair as a JWK
    pub fn jwk(&self) -> Jwk {
        let public_key = self.private_key.to_public_key();
        Jwk {
            kty: "RSA".to_string(),
            kid: self.kid.clone(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            n: URL_SAFE_NO_PAD.encode(public_key.n().to_bytes_be()),
            e: URL_SAFE_NO_PAD.encode(public_key.e().to_bytes_be()),
        }
    }
}

/// JSON Web Key (RFC 7517) for an RSA public key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always "RSA"
    pub kty: String,

    /// Key ID
    pub kid: String,

    /// Intended use, "sig" for signature verification
    #[serde(rename = "use")]
    pub key_use: String,

    /// Signing algorithm
    pub alg: String,

    /// Modulus (base64url)
    pub n: String,

    /// Public exponent (base64url)
    pub e: String,
}

impl Jwk {
    pub fn algorithm(&self) -> Option<Algorithm> {
        match self.alg.as_str() {
            "RS256" => Some(Algorithm::RS256),
            _ => None,
        }
    }
}

/// JSON Web Key Set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    pub fn single(key: Jwk) -> Self {
        Self { keys: vec![key] }
    }

    /// Find a key by its `kid`
    pub fn find_key(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}
