//! Menu item management (back-office)

use axum::extract::{Query, State};
use http::HeaderMap;
use serde::Deserialize;

use crate::auth::{self, Role};
use crate::db;
use crate::db::items::{ItemFlags, MenuItem};
use crate::error::{ApiResponse, ApiResult, AppError, ErrorCode};
use crate::state::AppState;
use crate::util::euros_to_cents;

/// Reject negative or non-finite prices before the cents conversion.
fn validate_price(price: f64) -> Result<i64, AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("Price must be a non-negative number"));
    }
    Ok(euros_to_cents(price))
}

#[derive(Deserialize)]
pub struct ItemCreate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub image_path: Option<String>,
    pub display_order: Option<i64>,
    #[serde(flatten)]
    pub flags: ItemFlags,
}

/// POST /api/menu/items
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<ItemCreate>,
) -> ApiResult<MenuItem> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Name, price and category are required"))?;
    let category_id = req
        .category_id
        .ok_or_else(|| AppError::validation("Name, price and category are required"))?;
    let price = req
        .price
        .ok_or_else(|| AppError::validation("Name, price and category are required"))?;
    let price_cents = validate_price(price)?;

    if db::categories::find_by_id(&state.pool, category_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::CategoryNotFound));
    }

    let id = db::items::create(
        &state.pool,
        category_id,
        name,
        req.description.as_deref(),
        price_cents,
        req.image_path.as_deref(),
        req.display_order.unwrap_or(0),
        &req.flags,
    )
    .await?;

    let item = db::items::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::internal("Created item vanished"))?;
    Ok(ApiResponse::success(item.into()))
}

#[derive(Deserialize)]
pub struct ItemUpdate {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    #[serde(flatten)]
    pub flags: ItemFlags,
}

/// PUT /api/menu/update — full-field update, not a partial patch
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<ItemUpdate>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = req
        .id
        .ok_or_else(|| AppError::validation("ID, name and price are required"))?;
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("ID, name and price are required"))?;
    let price = req
        .price
        .ok_or_else(|| AppError::validation("ID, name and price are required"))?;
    let price_cents = validate_price(price)?;

    let updated = db::items::update(
        &state.pool,
        id,
        name,
        req.description.as_deref(),
        price_cents,
        &req.flags,
    )
    .await?;
    if updated == 0 {
        return Err(AppError::not_found("Menu item"));
    }

    Ok(ApiResponse::ok("Menu item updated"))
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

/// DELETE /api/menu/update?id= — idempotent
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = query
        .id
        .ok_or_else(|| AppError::validation("Item ID is required"))?;
    db::items::delete(&state.pool, id).await?;
    Ok(ApiResponse::ok("Menu item deleted"))
}
