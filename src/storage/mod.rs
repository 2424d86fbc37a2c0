//! SQLite connection management and the `plants` table.

use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::CatalogResult;

pub mod plants;

/// Schema migrations under `migrations/`, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens a pool against `database_url`, creating the database file if needed.
pub async fn connect(database_url: &str, max_connections: u32) -> CatalogResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// A private in-memory database.
///
/// Every SQLite connection to `:memory:` gets its own database, so the pool is pinned to a
/// single connection that is never recycled.
pub async fn connect_in_memory() -> CatalogResult<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> CatalogResult<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}
