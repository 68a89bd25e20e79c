//! Menu category storage

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub display_order: i64,
    pub is_drink_category: bool,
    pub is_active: bool,
}

/// All categories, dominant sort key of the public catalog.
/// Order ties are broken by insertion id.
pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, display_name, description, display_order, is_drink_category, is_active
         FROM menu_categories
         ORDER BY display_order ASC, id ASC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, display_name, description, display_order, is_drink_category, is_active
         FROM menu_categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Exact-match lookup; uniqueness is case-sensitive by design.
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, display_name, description, display_order, is_drink_category, is_active
         FROM menu_categories WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    display_name: &str,
    description: Option<&str>,
    display_order: i64,
    is_drink_category: bool,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO menu_categories (name, display_name, description, display_order, is_drink_category)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(name)
    .bind(display_name)
    .bind(description)
    .bind(display_order)
    .bind(is_drink_category)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    display_name: &str,
    description: Option<&str>,
    display_order: i64,
    is_drink_category: bool,
    is_active: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE menu_categories
         SET name = ?, display_name = ?, description = ?, display_order = ?,
             is_drink_category = ?, is_active = ?
         WHERE id = ?",
    )
    .bind(name)
    .bind(display_name)
    .bind(description)
    .bind(display_order)
    .bind(is_drink_category)
    .bind(is_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Delete a category. Its items are cascade-deleted by the foreign key
/// (PRAGMA foreign_keys is ON for every connection).
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM menu_categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
