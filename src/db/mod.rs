//! Database access layer
//!
//! One module per table; free functions taking the pool. Connection
//! lifecycle and migrations live here, invoked once at startup.

pub mod categories;
pub mod items;
pub mod opening_hours;
pub mod sessions;
pub mod users;
pub mod visitors;

use crate::error::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Open the SQLite pool (WAL mode, foreign keys ON) and apply the
/// embedded migrations. Explicit and idempotent; the schema is never
/// created as a side effect of anything else.
pub async fn connect(db_path: &str) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
        .map_err(|e| AppError::internal(format!("Invalid database path: {e}")))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .pragma("foreign_keys", "ON");

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| AppError::internal(format!("Failed to open database: {e}")))?;

    // busy_timeout: wait up to 5s on write contention instead of failing
    sqlx::query("PRAGMA busy_timeout = 5000;")
        .execute(&pool)
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to apply migrations: {e}")))?;
    tracing::info!("Database ready (SQLite WAL, migrations applied)");

    Ok(pool)
}
