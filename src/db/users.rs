//! Admin user storage

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
    pub last_login: Option<String>,
    pub is_active: bool,
}

/// User row without the password hash, as listed in the back-office
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
    pub last_login: Option<String>,
    pub is_active: bool,
}

pub async fn find_active_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_users WHERE email = ? AND is_active = 1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<AdminUser>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM admin_users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn email_exists(pool: &SqlitePool, email: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM admin_users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

pub async fn list(pool: &SqlitePool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, email, name, role, created_at, last_login, is_active
         FROM admin_users
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    name: &str,
    role: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO admin_users (email, password_hash, name, role) VALUES (?, ?, ?, ?)",
    )
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_last_login(pool: &SqlitePool, id: i64, now: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET last_login = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_email(pool: &SqlitePool, id: i64, email: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET email = ? WHERE id = ?")
        .bind(email)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_name(pool: &SqlitePool, id: i64, name: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_role(pool: &SqlitePool, id: i64, role: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET role = ? WHERE id = ?")
        .bind(role)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_active(pool: &SqlitePool, id: i64, is_active: bool) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE admin_users SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn count_super_admins(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM admin_users WHERE role = 'super_admin'")
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Delete a user. Sessions are cascade-deleted by the foreign key.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM admin_users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create the bootstrap super admin if no user with this email exists.
/// Returns true when the account was created.
pub async fn ensure_default_admin(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    if email_exists(pool, email).await? {
        return Ok(false);
    }
    create(pool, email, password_hash, "Administrator", "super_admin").await?;
    Ok(true)
}
