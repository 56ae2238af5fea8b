//! HTTP Basic authentication against the single authorized instance

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::ApiError;
use crate::state::AppState;

/// The one instance allowed to query the directory
#[derive(Clone)]
pub struct AuthorizedInstance {
    pub instance_id: String,
    password: String,
}

impl std::fmt::Debug for AuthorizedInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizedInstance")
            .field("instance_id", &self.instance_id)
            .finish_non_exhaustive()
    }
}

impl AuthorizedInstance {
    pub fn new(instance_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, credentials: &Credentials) -> bool {
        credentials.instance_id == self.instance_id && credentials.password == self.password
    }
}

/// Decoded `instance:password` pair from a Basic header
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub instance_id: String,
    pub password: String,
}

/// Extract credentials from `Authorization: Basic base64(instance:password)`.
///
/// The password is everything after the first colon.
pub fn basic_credentials(headers: &HeaderMap) -> Result<Credentials, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("missing Authorization header"))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid Authorization header"))?;

    let encoded = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("basic") => rest.trim(),
        _ => return Err(ApiError::Unauthorized("expected Basic credentials")),
    };

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| ApiError::Unauthorized("invalid base64 in credentials"))?;
    let decoded =
        String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized("invalid UTF-8 in credentials"))?;

    let (instance_id, password) = decoded
        .split_once(':')
        .ok_or(ApiError::Unauthorized("invalid credential format"))?;

    Ok(Credentials {
        instance_id: instance_id.to_string(),
        password: password.to_string(),
    })
}

/// Reject requests whose Basic credentials are not the authorized instance's
pub async fn require_instance(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = basic_credentials(request.headers())?;
    tracing::debug!(instance = %credentials.instance_id, "Authenticating instance");

    if !state.instance.matches(&credentials) {
        return Err(ApiError::Unauthorized("unknown instance or wrong password"));
    }

    Ok(next.run(request).await)
}
