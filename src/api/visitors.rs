//! Visitor tracking and the statistics dashboard

use axum::extract::{Query, State};
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Role};
use crate::db;
use crate::db::visitors::{HourlyBucket, ScopeStats, TopPage, device_type};
use crate::error::{ApiResponse, ApiResult, AppError, ErrorCode};
use crate::state::AppState;
use crate::util::today;

#[derive(Deserialize)]
pub struct VisitPayload {
    pub page: Option<String>,
    #[serde(alias = "sessionId")]
    pub session_id: Option<String>,
}

/// Client address as seen through the usual proxy headers, falling back
/// to loopback when nothing is present.
fn client_ip(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(forwarded) = header("x-forwarded-for")
        && let Some(first) = forwarded.split(',').next()
    {
        let first = first.trim();
        if !first.is_empty() {
            return first.to_string();
        }
    }
    header("x-real-ip")
        .or_else(|| header("cf-connecting-ip"))
        .or_else(|| header("x-client-ip"))
        .unwrap_or("127.0.0.1")
        .to_string()
}

/// POST /api/visitors — append one visit event and maintain the daily
/// rollup. The uniqueness check and the increment are one logical
/// operation per request; the race between concurrent requests from the
/// same address is accepted.
pub async fn record_visit(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(payload): axum::Json<VisitPayload>,
) -> ApiResult<()> {
    let ip = client_ip(&headers);
    let user_agent = headers
        .get(http::header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let referrer = headers
        .get(http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let page = payload.page.as_deref().unwrap_or("/");

    let date = today();
    let prior_visits = db::visitors::count_visits_on(&state.pool, &ip, &date).await?;

    db::visitors::record(
        &state.pool,
        &ip,
        user_agent,
        page,
        referrer,
        payload.session_id.as_deref(),
    )
    .await?;
    db::visitors::bump_daily(&state.pool, &date, prior_visits == 0).await?;

    Ok(ApiResponse::ok("Visit recorded"))
}

#[derive(Serialize)]
pub struct RecentVisitor {
    pub ip_address: String,
    pub page_visited: Option<String>,
    pub visit_time: String,
    pub device_type: &'static str,
}

#[derive(Serialize)]
pub struct StatsSnapshot {
    pub today: ScopeStats,
    pub month: ScopeStats,
    pub year: ScopeStats,
    pub all_time: ScopeStats,
    pub recent_visitors: Vec<RecentVisitor>,
    pub top_pages: Vec<TopPage>,
    pub hourly_stats: Vec<HourlyBucket>,
}

/// GET /api/visitors — dashboard snapshot
pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<StatsSnapshot> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let now = chrono::Utc::now();
    let date = today();
    let month = now.format("%Y-%m").to_string();
    let year = now.format("%Y").to_string();

    let snapshot = StatsSnapshot {
        today: db::visitors::stats_for_day(&state.pool, &date).await?,
        month: db::visitors::stats_for_month(&state.pool, &month).await?,
        year: db::visitors::stats_for_year(&state.pool, &year).await?,
        all_time: db::visitors::stats_all_time(&state.pool).await?,
        recent_visitors: db::visitors::recent_visitors(&state.pool)
            .await?
            .into_iter()
            .map(|row| RecentVisitor {
                device_type: device_type(row.user_agent.as_deref().unwrap_or("")),
                ip_address: row.ip_address,
                page_visited: row.page_visited,
                visit_time: row.visit_time,
            })
            .collect(),
        top_pages: db::visitors::top_pages(&state.pool).await?,
        hourly_stats: db::visitors::hourly_buckets(&state.pool, &date).await?,
    };

    Ok(ApiResponse::success(snapshot))
}

#[derive(Deserialize)]
pub struct ResetQuery {
    pub confirm: Option<String>,
}

/// DELETE /api/visitors?confirm=true — irreversible truncation of both
/// visit tables
pub async fn reset_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ResetQuery>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    if query.confirm.as_deref() != Some("true") {
        return Err(AppError::new(ErrorCode::ConfirmationRequired));
    }

    db::visitors::reset(&state.pool).await?;
    tracing::info!("Visitor statistics reset");
    Ok(ApiResponse::ok("All visitor statistics have been reset"))
}
