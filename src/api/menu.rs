//! Public menu endpoint — the canonical nested read model

use axum::extract::State;
use serde::Serialize;
use std::collections::HashMap;

use crate::db;
use crate::db::categories::Category;
use crate::db::items::MenuItem;
use crate::error::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CategoryWithItems {
    #[serde(flatten)]
    pub category: Category,
    pub items: Vec<MenuItem>,
}

#[derive(Serialize)]
pub struct MenuData {
    pub categories: Vec<CategoryWithItems>,
    pub total_items: usize,
}

/// GET /api/menu
///
/// Categories ordered by display order, items grouped under their
/// resolved category and ordered by (display order, name).
pub async fn get_menu(State(state): State<AppState>) -> ApiResult<MenuData> {
    let categories = db::categories::list(&state.pool).await?;
    let items: Vec<MenuItem> = db::items::list_all(&state.pool)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total_items = items.len();

    let mut grouped: Vec<CategoryWithItems> = categories
        .into_iter()
        .map(|category| CategoryWithItems {
            category,
            items: Vec::new(),
        })
        .collect();
    let index: HashMap<i64, usize> = grouped
        .iter()
        .enumerate()
        .map(|(i, c)| (c.category.id, i))
        .collect();
    for item in items {
        if let Some(&i) = index.get(&item.category_id) {
            grouped[i].items.push(item);
        }
    }

    Ok(ApiResponse::success(MenuData {
        categories: grouped,
        total_items,
    }))
}
