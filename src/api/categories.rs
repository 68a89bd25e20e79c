//! Menu category management (back-office)

use axum::extract::{Query, State};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::db;
use crate::db::categories::Category;
use crate::error::{ApiResponse, ApiResult, AppError};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CategoryCreate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "order")]
    pub display_order: Option<i64>,
    #[serde(default, alias = "is_drink")]
    pub is_drink_category: bool,
}

/// POST /api/menu/categories
pub async fn create_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<CategoryCreate>,
) -> ApiResult<Category> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name and display name are required"))?;
    let display_name = req
        .display_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name and display name are required"))?;

    if db::categories::find_by_name(&state.pool, name).await?.is_some() {
        return Err(AppError::duplicate("Category with this name already exists"));
    }

    let id = db::categories::create(
        &state.pool,
        name,
        display_name,
        req.description.as_deref(),
        req.display_order.unwrap_or(0),
        req.is_drink_category,
    )
    .await?;

    let category = db::categories::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::internal("Created category vanished"))?;
    Ok(ApiResponse::success(category))
}

#[derive(Deserialize)]
pub struct CategoryUpdate {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "order")]
    pub display_order: Option<i64>,
    #[serde(default, alias = "is_drink")]
    pub is_drink_category: bool,
    pub is_active: Option<bool>,
}

/// PUT /api/menu/categories — full-field update
pub async fn update_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<CategoryUpdate>,
) -> ApiResult<Category> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = req
        .id
        .ok_or_else(|| AppError::validation("Category ID is required"))?;
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name and display name are required"))?;
    let display_name = req
        .display_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name and display name are required"))?;

    let existing = db::categories::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;

    // Renaming onto an existing name is a conflict
    if name != existing.name
        && db::categories::find_by_name(&state.pool, name).await?.is_some()
    {
        return Err(AppError::duplicate("Category with this name already exists"));
    }

    db::categories::update(
        &state.pool,
        id,
        name,
        display_name,
        req.description.as_deref(),
        req.display_order.unwrap_or(0),
        req.is_drink_category,
        req.is_active.unwrap_or(true),
    )
    .await?;

    let category = db::categories::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Category"))?;
    Ok(ApiResponse::success(category))
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

/// DELETE /api/menu/categories?id= — cascades to the category's items
pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = query
        .id
        .ok_or_else(|| AppError::validation("Category ID is required"))?;
    db::categories::delete(&state.pool, id).await?;
    Ok(ApiResponse::ok("Category deleted"))
}
