//! Test utilities for integration tests

use std::sync::{Arc, OnceLock};

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use mockidp_oidc::{config::OidcConfig, factory::TokenFactory};
use serde_json::Value;
use tower::ServiceExt;

pub const ISSUER: &str = "http://localhost:8000";

/// One signed catalogue shared by every test in the binary
fn shared_tokens() -> Arc<TokenFactory> {
    static TOKENS: OnceLock<Arc<TokenFactory>> = OnceLock::new();
    TOKENS
        .get_or_init(|| {
            Arc::new(TokenFactory::new(&OidcConfig::with_issuer(ISSUER)).unwrap())
        })
        .clone()
}

/// Test application wrapper
pub struct TestApp {
    router: Router,
    pub tokens: Arc<TokenFactory>,
}

impl TestApp {
    pub fn new() -> Self {
        let tokens = shared_tokens();
        let state = mockidp_server::state::AppState::with_tokens(
            OidcConfig::with_issuer(ISSUER),
            tokens.clone(),
        );

        Self {
            router: mockidp_server::create_router(state),
            tokens,
        }
    }

    /// Get the router for making requests
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn get(&self, uri: &str, authorization: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }

        self.router()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
