//! Menu item storage
//!
//! Prices are stored as integer cents and exposed as decimal euros in
//! the API; the conversion lives in [`crate::util`].

use crate::util::cents_to_euros;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Dietary/attribute flags carried by every item. Open set: absent flags
/// default to false on input and serialize explicitly on output.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ItemFlags {
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub spicy: bool,
    #[serde(default)]
    pub gluten_free: bool,
    #[serde(default)]
    pub lactose_free: bool,
    #[serde(default)]
    pub kid_friendly: bool,
    #[serde(default)]
    pub alcohol_free: bool,
    #[serde(default)]
    pub contains_alcohol: bool,
    #[serde(default)]
    pub homemade: bool,
    #[serde(default)]
    pub sugar_free: bool,
    #[serde(default)]
    pub recommended: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MenuItemRow {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image_path: Option<String>,
    pub display_order: i64,
    pub is_available: bool,
    #[sqlx(flatten)]
    pub flags: ItemFlags,
}

/// Item as served by the API
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_path: Option<String>,
    pub display_order: i64,
    pub is_available: bool,
    #[serde(flatten)]
    pub flags: ItemFlags,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            category_id: row.category_id,
            name: row.name,
            description: row.description,
            price: cents_to_euros(row.price_cents),
            image_path: row.image_path,
            display_order: row.display_order,
            is_available: row.is_available,
            flags: row.flags,
        }
    }
}

const ITEM_COLUMNS: &str = "id, category_id, name, description, price_cents, image_path, \
     display_order, is_available, vegetarian, vegan, spicy, gluten_free, lactose_free, \
     kid_friendly, alcohol_free, contains_alcohol, homemade, sugar_free, recommended";

/// All items in catalog order: grouped per category, then display order,
/// then name as the tie-break.
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<MenuItemRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {ITEM_COLUMNS} FROM menu_items
         ORDER BY category_id ASC, display_order ASC, name ASC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<MenuItemRow>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {ITEM_COLUMNS} FROM menu_items WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    pool: &SqlitePool,
    category_id: i64,
    name: &str,
    description: Option<&str>,
    price_cents: i64,
    image_path: Option<&str>,
    display_order: i64,
    flags: &ItemFlags,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO menu_items (
            category_id, name, description, price_cents, image_path, display_order,
            vegetarian, vegan, spicy, gluten_free, lactose_free,
            kid_friendly, alcohol_free, contains_alcohol, homemade, sugar_free, recommended
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(category_id)
    .bind(name)
    .bind(description)
    .bind(price_cents)
    .bind(image_path)
    .bind(display_order)
    .bind(flags.vegetarian)
    .bind(flags.vegan)
    .bind(flags.spicy)
    .bind(flags.gluten_free)
    .bind(flags.lactose_free)
    .bind(flags.kid_friendly)
    .bind(flags.alcohol_free)
    .bind(flags.contains_alcohol)
    .bind(flags.homemade)
    .bind(flags.sugar_free)
    .bind(flags.recommended)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Full-field update (not a partial patch); returns affected row count
/// so the caller can distinguish an absent id.
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    description: Option<&str>,
    price_cents: i64,
    flags: &ItemFlags,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE menu_items SET
            name = ?, description = ?, price_cents = ?,
            vegetarian = ?, vegan = ?, spicy = ?, gluten_free = ?, lactose_free = ?,
            kid_friendly = ?, alcohol_free = ?, contains_alcohol = ?, homemade = ?,
            sugar_free = ?, recommended = ?
         WHERE id = ?",
    )
    .bind(name)
    .bind(description)
    .bind(price_cents)
    .bind(flags.vegetarian)
    .bind(flags.vegan)
    .bind(flags.spicy)
    .bind(flags.gluten_free)
    .bind(flags.lactose_free)
    .bind(flags.kid_friendly)
    .bind(flags.alcohol_free)
    .bind(flags.contains_alcohol)
    .bind(flags.homemade)
    .bind(flags.sugar_free)
    .bind(flags.recommended)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Unconditional delete by id; absent rows are not an error.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM menu_items WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Set or clear the stored image reference; returns affected row count.
pub async fn set_image(
    pool: &SqlitePool,
    id: i64,
    image_path: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE menu_items SET image_path = ? WHERE id = ?")
        .bind(image_path)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
