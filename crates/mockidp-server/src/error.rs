//! Handler errors

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing Authorization header")]
    MissingAuthorization,

    #[error("malformed Authorization header, expected a Bearer token")]
    MalformedAuthorization,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("Rejected request: {}", self);

        let status = match self {
            ApiError::MissingAuthorization | ApiError::MalformedAuthorization => {
                StatusCode::UNAUTHORIZED
            }
        };

        (
            status,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            format!("{}\n", self),
        )
            .into_response()
    }
}
