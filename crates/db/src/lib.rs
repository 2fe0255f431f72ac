//! SQLite access layer: pool construction, migrations, models, and
//! repositories.
//!
//! Repositories perform plain reads and writes; input validation,
//! uniqueness pre-checks, and ownership gating live in `tally-store`.

pub mod models;
pub mod repositories;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Database location used when `DATABASE_URL` is unset.
const DEFAULT_DATABASE_URL: &str = "sqlite://tallyboard.db";

/// Create a connection pool for the given database URL. The database file
/// is created when missing; foreign keys are enforced.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Create a pool from the `DATABASE_URL` environment variable, reading a
/// `.env` file when one is present.
pub async fn connect_from_env() -> Result<SqlitePool, sqlx::Error> {
    dotenvy::dotenv().ok();
    let url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
    tracing::info!(url = %url, "connecting to database");
    create_pool(&url).await
}

/// Apply the embedded migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Verify the database answers queries.
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
