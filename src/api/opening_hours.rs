//! Opening hours endpoints

use axum::extract::State;
use chrono::Datelike;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::auth::{self, Role};
use crate::db;
use crate::db::opening_hours::OpeningHours;
use crate::error::{ApiResponse, ApiResult, AppError};
use crate::state::AppState;
use crate::util::today;

#[derive(Serialize)]
pub struct ScheduleDay {
    #[serde(flatten)]
    pub hours: OpeningHours,
    pub is_on_vacation: bool,
    pub is_today: bool,
    pub display_text: String,
}

/// GET /api/opening-hours — the 7 rows in weekday order with derived flags
pub async fn get_schedule(State(state): State<AppState>) -> ApiResult<Vec<ScheduleDay>> {
    let rows = db::opening_hours::list(&state.pool).await?;

    let date = today();
    let weekday_today = chrono::Utc::now().weekday().number_from_monday() as i64;

    let schedule = rows
        .into_iter()
        .map(|hours| ScheduleDay {
            is_on_vacation: hours.is_on_vacation(&date),
            is_today: hours.day_of_week == weekday_today,
            display_text: hours.display_text(&date),
            hours,
        })
        .collect();

    Ok(ApiResponse::success(schedule))
}

#[derive(Deserialize)]
pub struct HoursUpdate {
    pub id: Option<i64>,
    pub day_name: Option<String>,
    pub open_time_1: Option<String>,
    pub close_time_1: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
    #[serde(default)]
    pub closed: bool,
    pub vacation_start: Option<String>,
    pub vacation_end: Option<String>,
    #[serde(default)]
    pub vacation_active: bool,
}

/// PUT /api/opening-hours — overwrite one weekday row
pub async fn update_day(
    State(state): State<AppState>,
    headers: HeaderMap,
    axum::Json(req): axum::Json<HoursUpdate>,
) -> ApiResult<()> {
    auth::authorize(&state.pool, &headers, Role::Admin).await?;

    let id = req
        .id
        .ok_or_else(|| AppError::validation("Missing required fields"))?;
    if req.day_name.as_deref().is_none_or(|d| d.is_empty()) {
        return Err(AppError::validation("Missing required fields"));
    }

    let updated = db::opening_hours::update(
        &state.pool,
        id,
        req.open_time_1.as_deref(),
        req.close_time_1.as_deref(),
        req.open_time_2.as_deref(),
        req.close_time_2.as_deref(),
        req.closed,
        req.vacation_start.as_deref(),
        req.vacation_end.as_deref(),
        req.vacation_active,
    )
    .await?;
    if updated == 0 {
        return Err(AppError::not_found("Opening hours row"));
    }

    Ok(ApiResponse::ok("Opening hours updated"))
}
