//! Test utilities for integration tests

use std::path::Path;

use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use mockidp_cega::{auth::AuthorizedInstance, directory::Directory, state::AppState};
use tempfile::NamedTempFile;
use tower::ServiceExt;

pub const INSTANCE: &str = "svc";
pub const PASSWORD: &str = "secret";

/// Test application backed by a temporary user file
pub struct TestApp {
    router: Router,
    users: NamedTempFile,
}

impl TestApp {
    pub async fn with_users(json: &str) -> Self {
        let users = NamedTempFile::new().unwrap();
        std::fs::write(users.path(), json).unwrap();

        let directory = Directory::open(users.path()).await.unwrap();
        let state = AppState::new(AuthorizedInstance::new(INSTANCE, PASSWORD), directory);

        Self {
            router: mockidp_cega::create_router(state),
            users,
        }
    }

    pub fn users_path(&self) -> &Path {
        self.users.path()
    }

    /// Replace the backing file without restarting
    pub fn rewrite_users(&self, json: &str) {
        std::fs::write(self.users.path(), json).unwrap();
    }

    pub async fn get(&self, uri: &str, authorization: Option<String>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

pub fn basic(instance: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{instance}:{password}")))
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
