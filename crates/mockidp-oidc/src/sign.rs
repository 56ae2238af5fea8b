//! One-shot signing of short-lived test tokens with a key loaded from disk

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::EncodingKey;

use crate::keys::KEY_ID;
use crate::token::{Audience, PassportClaims, TokenError, TokenSigner};

/// Audience expected by the services under test
pub const TEST_AUDIENCE: &str = "XC56EL11xx";

/// Issuer expected by the services under test
pub const TEST_ISSUER: &str = "http://localhost";

/// Read a PEM encoded RSA private key (PKCS#1 or PKCS#8)
pub fn load_signing_key(path: &Path) -> Result<EncodingKey, TokenError> {
    let pem = std::fs::read(path).map_err(|source| TokenError::KeyFile {
        path: path.display().to_string(),
        source,
    })?;
    EncodingKey::from_rsa_pem(&pem).map_err(|e| TokenError::EncodingFailed(e.to_string()))
}

/// Sign a token for `subject` valid from one day before `now` to one day after
pub fn sign_subject_token(
    key: EncodingKey,
    subject: &str,
    now: DateTime<Utc>,
) -> Result<String, TokenError> {
    let claims = PassportClaims::new(
        subject,
        TEST_ISSUER,
        (now - Duration::days(1)).timestamp(),
        (now + Duration::days(1)).timestamp(),
    )
    .with_audience(Audience::Single(TEST_AUDIENCE.to_string()));

    TokenSigner::from_encoding_key(key, KEY_ID, None).sign_claims(&claims)
}
