//! CEGA user directory
//!
//! Looks up user records by username for a single authorized instance. The
//! records come from a JSON file that is re-read on every authenticated
//! request.

pub mod auth;
pub mod directory;
pub mod error;
pub mod routes;
pub mod state;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Create the router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/username/:identifier", get(routes::user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_instance,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
