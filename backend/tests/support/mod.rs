//! Shared helpers for the embedded PostgreSQL suites.
//!
//! Each suite provisions a fresh database on the process-wide cluster,
//! migrates it with the backend's embedded migrations, and talks to it through
//! both the Diesel adapters and a raw `postgres` client.

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;
use uuid::Uuid;

use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// A migrated database plus a pool and runtime to drive the adapters.
pub struct Database {
    pub runtime: Runtime,
    pub url: String,
    pub pool: DbPool,
}

/// Create a uniquely named database on the shared cluster and migrate it.
pub fn provision_database() -> Result<Database, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;

    let name = format!("articles_test_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = cluster.connection().database_url(&name);

    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| format!("migrate: {err}"))?;
        DbPool::new(PoolConfig::new(&url).with_max_size(2))
            .await
            .map_err(|err| format!("pool: {err}"))
    })?;

    Ok(Database { runtime, url, pool })
}

/// Connect a raw client for statements the adapters never issue.
pub fn raw_client(url: &str) -> postgres::Client {
    postgres::Client::connect(url, postgres::NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
}
