//! Persistence for movies and users on PostgreSQL.
//!
//! Every store call runs under its own deadline (see [`with_deadline`]),
//! separate from any HTTP-level timeout.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod repositories;

use error::StoreError;

pub type DbPool = sqlx::PgPool;

/// Deadline applied to each individual store call.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 25,
            idle_timeout: Duration::from_secs(15 * 60),
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, config: &PoolConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), StoreError> {
    with_deadline(QUERY_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

/// Run a store future, failing with [`StoreError::Timeout`] once `deadline`
/// elapses. Nothing is retried.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout(deadline)),
    }
}
