//! HTTP route handlers

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /username/:identifier`
///
/// Runs behind [`crate::auth::require_instance`]. The user list is reloaded
/// before every lookup so edits to the backing file apply immediately.
pub async fn user(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Response, ApiError> {
    tracing::info!("Requesting User {}", identifier);

    let index = state.directory.reload().await?;
    let user = index
        .by_username(&identifier)
        .ok_or_else(|| ApiError::UnknownUser(identifier.clone()))?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        user.as_json().to_string(),
    )
        .into_response())
}

/// Health check
pub async fn health() -> &'static str {
    "OK"
}
