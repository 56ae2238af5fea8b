//! Mock passport provider server library
//!
//! HTTP surface of the mock GA4GH passport provider. The library exposes the
//! router for integration testing while the binary handles startup.

pub mod error;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build CORS layer based on environment.
///
/// `MOCKIDP_CORS_ORIGINS` is a comma-separated list of allowed origins
/// (default: `*`).
pub fn cors_layer() -> CorsLayer {
    let origins = std::env::var("MOCKIDP_CORS_ORIGINS").unwrap_or_else(|_| "*".into());

    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let parsed: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Create the router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/openid-configuration", get(routes::discovery))
        .route("/jwk", get(routes::jwks))
        .route("/userinfo", get(routes::userinfo))
        .route("/tokens", get(routes::tokens))
        .route("/health", get(routes::health))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
