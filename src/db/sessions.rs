//! Session token storage
//!
//! Tokens are opaque UUIDv4 strings with an absolute expiry; a session is
//! valid iff the current time is before `expires_at`. Expired rows are
//! simply ignored on lookup — `delete_expired` exists for housekeeping
//! but nothing depends on it running.

use crate::db::users::AdminUser;
use crate::util::sql_now;
use sqlx::SqlitePool;

const SESSION_TTL_HOURS: i64 = 24;

/// Create a session for the user and return the opaque token.
pub async fn create(pool: &SqlitePool, user_id: i64) -> Result<String, sqlx::Error> {
    let token = uuid::Uuid::new_v4().to_string();
    let expires_at = (chrono::Utc::now() + chrono::Duration::hours(SESSION_TTL_HOURS))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    sqlx::query("INSERT INTO user_sessions (id, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(user_id)
        .bind(&expires_at)
        .execute(pool)
        .await?;

    Ok(token)
}

/// Resolve a token to its user, provided the session has not expired.
/// Side-effect-free.
pub async fn find_user_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as(
        "SELECT u.* FROM user_sessions s
         JOIN admin_users u ON s.user_id = u.id
         WHERE s.id = ? AND s.expires_at > ?",
    )
    .bind(token)
    .bind(sql_now())
    .fetch_optional(pool)
    .await
}

/// Delete a session. Idempotent; an absent token is not an error.
pub async fn delete(pool: &SqlitePool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_sessions WHERE id = ?")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove sessions past their expiry.
pub async fn delete_expired(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_sessions WHERE expires_at <= ?")
        .bind(sql_now())
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn count_for_user(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_sessions WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
