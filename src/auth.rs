//! Session-cookie authentication and role-based authorization
//!
//! Tokens live in the `session` HttpOnly cookie and resolve to a user
//! through the sessions table. `authorize` is the single capability
//! check used by every privileged handler; the role hierarchy is defined
//! once in [`Role::satisfies`].

use http::HeaderMap;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::db::users::AdminUser;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";

/// Matches the 24h session lifetime in the sessions table.
const SESSION_COOKIE_MAX_AGE: i64 = 24 * 60 * 60;

/// Back-office roles. `super_admin` satisfies every `admin` requirement;
/// the reverse does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn from_db(role: &str) -> Option<Role> {
        match role {
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    pub fn satisfies(&self, required: Role) -> bool {
        match required {
            Role::Admin => true,
            Role::SuperAdmin => *self == Role::SuperAdmin,
        }
    }
}

/// Authenticated user as exposed by the API. The password hash never
/// leaves the db layer.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AdminIdentity {
    pub fn from_user(user: &AdminUser) -> Result<Self, AppError> {
        let role = Role::from_db(&user.role)
            .ok_or_else(|| AppError::internal(format!("Unknown role '{}'", user.role)))?;
        Ok(Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role,
        })
    }
}

/// Extract the session token from the Cookie header, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(http::header::COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        if let Some((name, value)) = pair.trim().split_once('=')
            && name == SESSION_COOKIE
        {
            return Some(value.to_string());
        }
    }
    None
}

/// Resolve the request's session cookie to a user and check its role.
///
/// Fails with 401 when the cookie is missing, unknown or expired and
/// 403 when the resolved role does not satisfy `required`. Auth errors
/// stay deliberately non-specific.
pub async fn authorize(
    pool: &SqlitePool,
    headers: &HeaderMap,
    required: Role,
) -> Result<AdminIdentity, AppError> {
    let token = session_token(headers).ok_or_else(AppError::not_authenticated)?;

    let user = db::sessions::find_user_by_token(pool, &token)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Session lookup failed");
            AppError::session_expired()
        })?;

    let identity = AdminIdentity::from_user(&user)?;
    if !identity.role.satisfies(required) {
        return Err(AppError::permission_denied());
    }
    Ok(identity)
}

/// Set-Cookie value for a fresh session. `secure` outside development.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Strict; Max-Age={SESSION_COOKIE_MAX_AGE}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Set-Cookie value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0")
}
