//! PostgreSQL access for the greenlight API.
//!
//! Pool construction, migrations, and one repository per table. Every
//! connection carries a server-side `statement_timeout`, so a slow query is
//! cancelled by PostgreSQL instead of holding a connection indefinitely.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Upper bound on a single statement.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Deadline for acquiring a connection (including the first one at startup).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// PostgreSQL connection string.
    pub dsn: String,
    /// Maximum number of open connections.
    pub max_open_conns: u32,
    /// Connections kept open while idle. Capped at `max_open_conns`.
    pub max_idle_conns: u32,
    /// How long an idle connection may live before being closed.
    pub max_idle_time: Duration,
}

fn connect_options(config: &PoolConfig) -> Result<PgConnectOptions, sqlx::Error> {
    Ok(PgConnectOptions::from_str(&config.dsn)?.options([(
        "statement_timeout",
        QUERY_TIMEOUT.as_millis().to_string(),
    )]))
}

fn pool_options(config: &PoolConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_open_conns)
        .min_connections(config.max_idle_conns.min(config.max_open_conns))
        .idle_timeout(config.max_idle_time)
        .acquire_timeout(CONNECT_TIMEOUT)
}

/// Create a connection pool and establish the first connection.
pub async fn create_pool(config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        max_open_conns = config.max_open_conns,
        max_idle_conns = config.max_idle_conns,
        "Opening PostgreSQL pool"
    );
    pool_options(config)
        .connect_with(connect_options(config)?)
        .await
}

/// Create a pool that connects on first use.
///
/// Useful when the caller may never touch the database, e.g. router tests
/// that only exercise validation and routing.
pub fn create_lazy_pool(config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    Ok(pool_options(config)
        .min_connections(0)
        .connect_lazy_with(connect_options(config)?))
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// `true` if `err` is a PostgreSQL unique violation (23505) on `constraint`.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
