//! Mock passport provider
//!
//! Serves the discovery document, key set, userinfo and fixture tokens.

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use mockidp_oidc::config::{OidcConfig, DEFAULT_ISSUER_URL};
use mockidp_server::{create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mockidp-server")]
#[command(version, about = "Mock GA4GH passport provider", long_about = None)]
struct Cli {
    /// Address to bind to
    host: String,

    /// Port to listen on
    port: u16,

    /// Public base URL of this provider, used for `iss` and `jku`
    #[arg(long, env = "ISSUER_URL", default_value = DEFAULT_ISSUER_URL)]
    issuer_url: String,
}

fn build_app(cli: &Cli) -> Result<Router> {
    let config = OidcConfig::parse(&cli.issuer_url).context("invalid ISSUER_URL")?;

    // Key generation or signing failure aborts before anything is served
    let state = AppState::new(config).context("failed to sign the token catalogue")?;

    Ok(create_router(state))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "mockidp_server=debug,mockidp_oidc=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = build_app(&cli)?;

    let addr = format!("{}:{}", cli.host, cli.port);
    tracing::info!("Starting mock passport provider on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use clap::{error::ErrorKind, CommandFactory};
    use tower::ServiceExt;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_host_and_port_required() {
        for args in [&["mockidp-server"][..], &["mockidp-server", "0.0.0.0"][..]] {
            let err = Cli::try_parse_from(args).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "{args:?}");
            assert_eq!(err.exit_code(), 2);
            assert!(err.use_stderr());
        }

        let err = Cli::try_parse_from(["mockidp-server", "0.0.0.0", "http"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_explicit_issuer_url() {
        let cli = Cli::try_parse_from([
            "mockidp-server",
            "0.0.0.0",
            "8000",
            "--issuer-url",
            "http://mockauth:8000",
        ])
        .unwrap();
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8000);
        assert_eq!(cli.issuer_url, "http://mockauth:8000");
    }

    #[test]
    fn test_issuer_url_without_scheme_is_fatal() {
        let cli = Cli::try_parse_from([
            "mockidp-server",
            "0.0.0.0",
            "8000",
            "--issuer-url",
            "localhost:8000",
        ])
        .unwrap();
        assert!(build_app(&cli).is_err());
    }

    // The only test in this binary that touches the process environment
    #[tokio::test]
    async fn test_issuer_url_from_environment() {
        let args = ["mockidp-server", "127.0.0.1", "8000"];

        std::env::remove_var("ISSUER_URL");
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.issuer_url, DEFAULT_ISSUER_URL);
        assert_eq!(cli.issuer_url, "http://localhost:8000");

        std::env::set_var("ISSUER_URL", "http://mockauth:8000");
        let cli = Cli::try_parse_from(args).unwrap();
        let overridden = Cli::try_parse_from([
            "mockidp-server",
            "127.0.0.1",
            "8000",
            "--issuer-url",
            "http://other:9000",
        ])
        .unwrap();
        std::env::remove_var("ISSUER_URL");

        assert_eq!(cli.issuer_url, "http://mockauth:8000");
        assert_eq!(overridden.issuer_url, "http://other:9000");

        // End to end from the environment-bound issuer
        let app = build_app(&cli).unwrap();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/openid-configuration")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let document: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(document["jwks_uri"], "http://mockauth:8000/jwk");
    }
}
