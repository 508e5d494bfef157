//! Register an account that can sign in to the articles backend.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use backend::domain::Email;
use backend::outbound::persistence::{
    DbPool, DieselLoginService, PoolConfig, run_pending_migrations,
};
use clap::Parser;
use tokio::runtime::Builder;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

/// `create-user` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "create-user",
    about = "Create a user account with a salted password digest",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Sign-in email; stored lowercased.
    #[arg(long, value_name = "address")]
    email: String,
    /// Plain-text password; only its digest is stored.
    #[arg(long, value_name = "secret")]
    password: String,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let _ = fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let password = Zeroizing::new(args.password);
    if password.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "password must not be empty",
        ));
    }
    let email = Email::new(&args.email)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error.to_string()))?;

    let database_url = resolve_database_url(args.database_url)?;
    run_pending_migrations(&database_url)
        .await
        .map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(1))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let user_id = DieselLoginService::new(pool)
        .register(&email, &password)
        .await
        .map_err(|error| io::Error::other(error.message().to_owned()))?;
    info!(%user_id, %email, "user created");
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    explicit
        .or_else(|| env::var("DATABASE_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "missing database URL: pass --database-url or set DATABASE_URL",
            )
        })
}
