//! HTTP route handlers

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Json,
};
use mockidp_oidc::{discovery::DiscoveryDocument, keys::JwkSet};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Discovery endpoint
pub async fn discovery(State(state): State<AppState>) -> Json<DiscoveryDocument> {
    Json(DiscoveryDocument::from_config(&state.config))
}

/// JWKS endpoint
pub async fn jwks(State(state): State<AppState>) -> Json<JwkSet> {
    Json(state.tokens.jwks().clone())
}

/// Pre-signed tokens for bootstrapping test clients
pub async fn tokens(State(state): State<AppState>) -> Json<[String; 3]> {
    Json(state.tokens.fixtures().map(str::to_string))
}

/// UserInfo response. Empty when the subject has not released a passport.
#[derive(Debug, Default, Serialize)]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ga4gh_passport_v1: Option<Vec<String>>,
}

/// UserInfo endpoint
///
/// The presented token is not validated. The empty token gets no claims and
/// every other bearer gets the full passport.
pub async fn userinfo(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<UserInfo>, ApiError> {
    let token = bearer_token(&headers)?;

    if state.tokens.is_empty_token(token) {
        tracing::debug!("Empty token presented, releasing no passport claims");
        return Ok(Json(UserInfo::default()));
    }

    let passport = state
        .tokens
        .visas()
        .iter()
        .map(|visa| visa.token.clone())
        .collect();

    Ok(Json(UserInfo {
        ga4gh_passport_v1: Some(passport),
    }))
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::MissingAuthorization)?
        .to_str()
        .map_err(|_| ApiError::MalformedAuthorization)?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(ApiError::MalformedAuthorization),
    }
}

/// Health check
pub async fn health() -> &'static str {
    "OK"
}
