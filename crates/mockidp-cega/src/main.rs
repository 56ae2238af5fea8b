//! CEGA user directory server

use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use mockidp_cega::{auth::AuthorizedInstance, create_router, directory::Directory, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mockidp-cega")]
#[command(version, about = "Credential-gated CEGA user directory", long_about = None)]
struct Cli {
    /// Address to bind to
    host: String,

    /// Port to listen on
    port: u16,

    /// JSON file holding the user records
    file: PathBuf,

    /// Instance allowed to query the directory
    #[arg(long, env = "CEGA_USERS_USER")]
    user: String,

    /// Password of the authorized instance
    #[arg(long, env = "CEGA_USERS_PASSWORD", hide_env_values = true)]
    password: String,
}

/// Load the user list and wire the router; a bad file is fatal here
async fn build_app(cli: Cli) -> Result<Router> {
    let directory = Directory::open(&cli.file)
        .await
        .context("cannot start without a valid user list")?;
    let state = AppState::new(AuthorizedInstance::new(cli.user, cli.password), directory);

    Ok(create_router(state))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mockidp_cega=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = format!("{}:{}", cli.host, cli.port);
    let app = build_app(cli).await?;

    tracing::info!("Starting CEGA directory on {}", addr);

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
    use base64::{engine::general_purpose::STANDARD, Engine};
    use clap::{error::ErrorKind, CommandFactory};
    use tower::ServiceExt;

    const CREDENTIALS: [&str; 4] = ["--user", "svc", "--password", "secret"];

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(
            std::iter::once("mockidp-cega")
                .chain(args.iter().copied())
                .chain(CREDENTIALS),
        )
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_arguments_required() {
        for args in [
            &[][..],
            &["0.0.0.0"][..],
            &["0.0.0.0", "8443"][..],
        ] {
            let err = parse(args).err().unwrap();
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "{args:?}");
            assert_eq!(err.exit_code(), 2);
            assert!(err.use_stderr());
        }

        let cli = parse(&["0.0.0.0", "8443", "users.json"]).unwrap();
        assert_eq!(cli.host, "0.0.0.0");
        assert_eq!(cli.port, 8443);
        assert_eq!(cli.file, PathBuf::from("users.json"));
    }

    #[test]
    fn test_non_numeric_port_rejected() {
        let err = parse(&["0.0.0.0", "https", "users.json"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    // The only test in this binary that touches the process environment
    #[tokio::test]
    async fn test_credentials_from_environment() {
        std::env::remove_var("CEGA_USERS_USER");
        std::env::remove_var("CEGA_USERS_PASSWORD");

        let args = ["mockidp-cega", "0.0.0.0", "8443", "users.json"];
        let err = Cli::try_parse_from(args).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        std::env::set_var("CEGA_USERS_USER", "svc");
        let err = Cli::try_parse_from(args).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        std::env::set_var("CEGA_USERS_PASSWORD", "secret");
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.user, "svc");
        assert_eq!(cli.password, "secret");

        // End to end from the environment-bound credentials
        let users = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            users.path(),
            r#"[{"username":"dummy@example.com","uid":1000}]"#,
        )
        .unwrap();
        let users_path = users.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["mockidp-cega", "127.0.0.1", "0", users_path]).unwrap();

        std::env::remove_var("CEGA_USERS_USER");
        std::env::remove_var("CEGA_USERS_PASSWORD");

        let app = build_app(cli).await.unwrap();
        let lookup = |password: &str| {
            Request::builder()
                .uri("/username/dummy@example.com")
                .header(
                    "Authorization",
                    format!("Basic {}", STANDARD.encode(format!("svc:{password}"))),
                )
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(lookup("secret")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], br#"{"username":"dummy@example.com","uid":1000}"#);

        let response = app.oneshot(lookup("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_user_list_is_fatal() {
        let cli = parse(&["127.0.0.1", "0", "/nonexistent/users.json"]).unwrap();
        assert!(build_app(cli).await.is_err());
    }
}
