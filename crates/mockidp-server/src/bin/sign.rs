//! Sign a short-lived test token for a subject and print it to stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mockidp_oidc::sign::{load_signing_key, sign_subject_token};

#[derive(Parser)]
#[command(name = "mockidp-sign")]
#[command(version, about = "Sign a test token with an RSA key from disk", long_about = None)]
struct Cli {
    /// Subject (`sub`) of the token
    subject: String,

    /// PEM encoded RSA private key
    #[arg(long, env = "MOCKIDP_SIGNING_KEY", default_value = "/shared/keys/jwt.key")]
    key: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let key = load_signing_key(&cli.key)
        .with_context(|| format!("cannot load signing key from {}", cli.key.display()))?;
    let token = sign_subject_token(key, &cli.subject, chrono::Utc::now())?;

    println!("{token}");
    Ok(())
}
