//! Handler errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::directory::DirectoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Credentials missing, undecodable or not the authorized instance's
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    #[error("no user named {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized(_) => {
                tracing::warn!("{}", self);
                (StatusCode::UNAUTHORIZED, "Protected access\n")
            }
            ApiError::UnknownUser(_) => {
                tracing::info!("{}", self);
                (StatusCode::BAD_REQUEST, "No info for that user\n")
            }
            ApiError::Directory(_) => {
                tracing::error!("User list unavailable: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "User list unavailable\n")
            }
        };

        (status, message).into_response()
    }
}
