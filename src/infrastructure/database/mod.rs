//! Database Module
//!
//! PostgreSQL connection pool, migrations, and constraint error translation.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::shared::error::AppError;

/// Create a PostgreSQL connection pool
pub async fn create_pool(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout))
        .connect(settings.connection_url())
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Translate a unique-constraint violation into `on_unique`; any other
/// failure stays a database error.
pub fn unique_violation(err: sqlx::Error, on_unique: impl FnOnce() -> AppError) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => on_unique(),
        _ => AppError::Database(err),
    }
}

/// Translate a foreign-key violation into `on_foreign_key`, and a unique
/// violation into `on_unique`.
pub fn constraint_violation(
    err: sqlx::Error,
    on_unique: impl FnOnce() -> AppError,
    on_foreign_key: impl FnOnce() -> AppError,
) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => on_foreign_key(),
        _ => unique_violation(err, on_unique),
    }
}
