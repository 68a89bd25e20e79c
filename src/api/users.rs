//! Admin user management (back-office)

use axum::extract::{Query, State};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Role};
use crate::db;
use crate::db::users::UserSummary;
use crate::error::{ApiResponse, ApiResult, AppError, ErrorCode};
use crate::state::AppState;
use crate::util::hash_password;

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Vec<UserSummary>> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;
    let users = db::users::list(&state.pool).await?;
    Ok(ApiResponse::success(users))
}

#[derive(Deserialize)]
pub struct UserCreate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedUser {
    pub id: i64,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<UserCreate>,
) -> ApiResult<CreatedUser> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::validation("Email, password and name are required"))?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Email, password and name are required"))?;
    let name = req
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Email, password and name are required"))?;

    let role = match req.role.as_deref() {
        None => Role::Admin,
        Some(r) => Role::from_db(r).ok_or_else(|| AppError::validation("Unknown role"))?,
    };

    if db::users::email_exists(&state.pool, email).await? {
        return Err(AppError::validation("Email already in use"));
    }

    let password_hash =
        hash_password(password).map_err(|e| AppError::internal(format!("Hashing failed: {e}")))?;
    let id = db::users::create(&state.pool, email, &password_hash, name, role.as_str()).await?;

    Ok(ApiResponse::success(CreatedUser { id }))
}

#[derive(Deserialize)]
pub struct UserUpdate {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// PUT /api/users — partial update of the supplied fields
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<UserUpdate>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = req
        .id
        .ok_or_else(|| AppError::validation("User ID is required"))?;
    if db::users::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("User"));
    }

    if let Some(email) = req.email.as_deref().filter(|e| !e.is_empty()) {
        db::users::update_email(&state.pool, id, email).await?;
    }
    if let Some(name) = req.name.as_deref().filter(|n| !n.is_empty()) {
        db::users::update_name(&state.pool, id, name).await?;
    }
    if let Some(role) = req.role.as_deref() {
        let role = Role::from_db(role).ok_or_else(|| AppError::validation("Unknown role"))?;
        db::users::update_role(&state.pool, id, role.as_str()).await?;
    }
    if let Some(is_active) = req.is_active {
        db::users::update_active(&state.pool, id, is_active).await?;
    }
    if let Some(password) = req.password.as_deref().filter(|p| !p.is_empty()) {
        let password_hash = hash_password(password)
            .map_err(|e| AppError::internal(format!("Hashing failed: {e}")))?;
        db::users::update_password(&state.pool, id, &password_hash).await?;
    }

    Ok(ApiResponse::ok("User updated"))
}

#[derive(Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

/// DELETE /api/users?id= — super admin only; the system must keep at
/// least one super_admin at all times
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IdQuery>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::SuperAdmin).await?;

    let id = query
        .id
        .ok_or_else(|| AppError::validation("User ID is required"))?;

    let Some(target) = db::users::find_by_id(&state.pool, id).await? else {
        // Idempotent: nothing to delete
        return Ok(ApiResponse::ok("User deleted"));
    };

    if target.role == Role::SuperAdmin.as_str()
        && db::users::count_super_admins(&state.pool).await? <= 1
    {
        return Err(AppError::new(ErrorCode::LastSuperAdminProtected));
    }

    db::users::delete(&state.pool, id).await?;
    Ok(ApiResponse::ok("User deleted"))
}
