//! Authentication endpoints: login, current user, logout

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::auth::{self, AdminIdentity, Role};
use crate::db;
use crate::error::{ApiResponse, ApiResult, AppError};
use crate::state::AppState;
use crate::util::{sql_now, verify_password};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth — verify credentials, issue a session cookie
pub async fn login(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<LoginRequest>,
) -> Result<Response, AppError> {
    let email = req
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::validation("Email and password are required"))?;
    let password = req
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::validation("Email and password are required"))?;

    // Absent, inactive and wrong-password all collapse into the same 401
    let user = db::users::find_active_by_email(&state.pool, email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let token = db::sessions::create(&state.pool, user.id).await?;
    db::users::update_last_login(&state.pool, user.id, &sql_now()).await?;

    let identity = AdminIdentity::from_user(&user)?;
    tracing::info!(user = %identity.email, "Admin login");

    let secure = state.config.environment != "development";
    let cookie = HeaderValue::from_str(&auth::session_cookie(&token, secure))
        .map_err(|e| AppError::internal(format!("Invalid cookie value: {e}")))?;

    let mut response = ApiResponse::success(identity).into_response();
    response.headers_mut().append(SET_COOKIE, cookie);
    Ok(response)
}

/// GET /api/auth — resolve the session cookie to the current user
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<AdminIdentity> {
    let identity = auth::authorize(&state.pool, &headers, Role::Admin).await?;
    Ok(ApiResponse::success(identity))
}

/// DELETE /api/auth — revoke the session. Always succeeds; revoking an
/// absent or expired token is a no-op.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = auth::session_token(&headers)
        && let Err(e) = db::sessions::delete(&state.pool, &token).await
    {
        tracing::warn!(error = %e, "Failed to delete session on logout");
    }

    let mut response = ApiResponse::ok("Logged out").into_response();
    if let Ok(cookie) = HeaderValue::from_str(&auth::clear_session_cookie()) {
        response.headers_mut().append(SET_COOKIE, cookie);
    }
    response
}
