//! Operator CLI for the single admin account.
//!
//! The blog has exactly one author, so account management stays out of
//! the HTTP surface entirely. This tool talks to the database directly.

use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use quill_core::domain::AdminUser;
use quill_core::ports::{AuthorRepository, PasswordService};
use quill_infra::{Argon2PasswordService, DatabaseConfig, SeaOrmAuthorRepository, connect};

#[derive(Parser)]
#[command(name = "quill-admin", about = "Manage the Quill admin account")]
struct Cli {
    /// Postgres connection string. Falls back to DATABASE_URL.
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the admin account.
    Create {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Set a new password for an existing account.
    ResetPassword {
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Generate a TOTP secret and enable MFA. Prints the secret for
    /// enrollment in an authenticator app.
    EnableMfa { username: String },
    /// Clear the TOTP secret.
    DisableMfa { username: String },
}

/// 160-bit secret, base32 without padding, as authenticator apps expect.
fn generate_totp_secret() -> String {
    let mut bytes = [0u8; 20];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(&Uuid::new_v4().as_bytes()[..4]);
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &bytes)
}

async fn load_user(repo: &SeaOrmAuthorRepository, username: &str) -> anyhow::Result<AdminUser> {
    match repo.find_by_username(username).await? {
        Some(user) => Ok(user),
        None => bail!("no admin user named '{username}'"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .init();

    let cli = Cli::parse();

    let db = connect(&DatabaseConfig {
        url: cli.database_url.clone(),
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .context("failed to connect to the database")?;

    let authors = SeaOrmAuthorRepository::new(Arc::new(db));
    let passwords = Argon2PasswordService::new();

    match cli.command {
        Command::Create { username, password } => {
            if authors.find_by_username(&username).await?.is_some() {
                bail!("admin user '{username}' already exists");
            }
            let hash = passwords
                .hash(&password)
                .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
            let user = authors.create(AdminUser::new(username, hash)).await?;
            println!("Created admin user '{}' ({})", user.username, user.id);
        }
        Command::ResetPassword { username, password } => {
            let mut user = load_user(&authors, &username).await?;
            user.password_hash = passwords
                .hash(&password)
                .map_err(|e| anyhow::anyhow!("password hashing failed: {e}"))?;
            user.updated_on = Utc::now();
            authors.update(user).await?;
            println!("Password updated for '{username}'");
        }
        Command::EnableMfa { username } => {
            let mut user = load_user(&authors, &username).await?;
            let secret = generate_totp_secret();
            user.mfa_secret = Some(secret.clone());
            user.updated_on = Utc::now();
            authors.update(user).await?;
            println!("MFA enabled for '{username}'");
            println!("Provisioning secret: {secret}");
        }
        Command::DisableMfa { username } => {
            let mut user = load_user(&authors, &username).await?;
            if !user.is_mfa_enabled() {
                println!("MFA is already disabled for '{username}'");
                return Ok(());
            }
            user.mfa_secret = None;
            user.updated_on = Utc::now();
            authors.update(user).await?;
            println!("MFA disabled for '{username}'");
        }
    }

    Ok(())
}
