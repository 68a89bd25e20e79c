//! Visitor event log and daily rollups
//!
//! `visitor_stats` is append-only; `daily_stats` is an upsert-accumulator
//! derived from it, never independently authoritative. The uniqueness
//! check-then-increment is one logical operation per request; concurrent
//! requests from the same address may double-count uniqueness, which is
//! an accepted approximation.

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ScopeStats {
    pub unique_visitors: i64,
    pub total_visits: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecentVisitorRow {
    pub ip_address: String,
    pub page_visited: Option<String>,
    pub visit_time: String,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopPage {
    pub page_visited: String,
    pub visits: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct HourlyBucket {
    pub hour: String,
    pub visits: i64,
}

/// Append one visit event.
pub async fn record(
    pool: &SqlitePool,
    ip_address: &str,
    user_agent: &str,
    page_visited: &str,
    referrer: &str,
    session_id: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO visitor_stats (ip_address, user_agent, page_visited, referrer, session_id)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(ip_address)
    .bind(user_agent)
    .bind(page_visited)
    .bind(referrer)
    .bind(session_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Number of events already recorded for this address on `date`.
pub async fn count_visits_on(
    pool: &SqlitePool,
    ip_address: &str,
    date: &str,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM visitor_stats WHERE ip_address = ? AND DATE(visit_time) = ?",
    )
    .bind(ip_address)
    .bind(date)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Upsert the daily rollup row: total always increments, unique only for
/// a first-time address on that date.
pub async fn bump_daily(pool: &SqlitePool, date: &str, new_unique: bool) -> Result<(), sqlx::Error> {
    if new_unique {
        sqlx::query(
            "INSERT INTO daily_stats (date, total_visits, unique_visitors, gallery_views)
             VALUES (?, 1, 1, 0)
             ON CONFLICT(date) DO UPDATE SET
                 total_visits = total_visits + 1,
                 unique_visitors = unique_visitors + 1",
        )
        .bind(date)
        .execute(pool)
        .await?;
    } else {
        sqlx::query(
            "INSERT INTO daily_stats (date, total_visits, unique_visitors, gallery_views)
             VALUES (?, 1, 0, 0)
             ON CONFLICT(date) DO UPDATE SET
                 total_visits = total_visits + 1",
        )
        .bind(date)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub async fn daily_row(pool: &SqlitePool, date: &str) -> Result<Option<ScopeStats>, sqlx::Error> {
    sqlx::query_as(
        "SELECT unique_visitors, total_visits FROM daily_stats WHERE date = ?",
    )
    .bind(date)
    .fetch_optional(pool)
    .await
}

pub async fn stats_for_day(pool: &SqlitePool, date: &str) -> Result<ScopeStats, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(DISTINCT ip_address) AS unique_visitors, COUNT(*) AS total_visits
         FROM visitor_stats WHERE DATE(visit_time) = ?",
    )
    .bind(date)
    .fetch_one(pool)
    .await
}

pub async fn stats_for_month(pool: &SqlitePool, month: &str) -> Result<ScopeStats, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(DISTINCT ip_address) AS unique_visitors, COUNT(*) AS total_visits
         FROM visitor_stats WHERE strftime('%Y-%m', visit_time) = ?",
    )
    .bind(month)
    .fetch_one(pool)
    .await
}

pub async fn stats_for_year(pool: &SqlitePool, year: &str) -> Result<ScopeStats, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(DISTINCT ip_address) AS unique_visitors, COUNT(*) AS total_visits
         FROM visitor_stats WHERE strftime('%Y', visit_time) = ?",
    )
    .bind(year)
    .fetch_one(pool)
    .await
}

pub async fn stats_all_time(pool: &SqlitePool) -> Result<ScopeStats, sqlx::Error> {
    sqlx::query_as(
        "SELECT COUNT(DISTINCT ip_address) AS unique_visitors, COUNT(*) AS total_visits
         FROM visitor_stats",
    )
    .fetch_one(pool)
    .await
}

/// Latest public page views, admin and login traffic excluded.
pub async fn recent_visitors(pool: &SqlitePool) -> Result<Vec<RecentVisitorRow>, sqlx::Error> {
    sqlx::query_as(
        "SELECT ip_address, page_visited, visit_time, user_agent
         FROM visitor_stats
         WHERE page_visited NOT LIKE '/admin%' AND page_visited != '/login'
         ORDER BY visit_time DESC, id DESC
         LIMIT 50",
    )
    .fetch_all(pool)
    .await
}

pub async fn top_pages(pool: &SqlitePool) -> Result<Vec<TopPage>, sqlx::Error> {
    sqlx::query_as(
        "SELECT page_visited, COUNT(*) AS visits
         FROM visitor_stats
         WHERE page_visited NOT LIKE '/admin%' AND page_visited != '/login'
         GROUP BY page_visited
         ORDER BY visits DESC
         LIMIT 10",
    )
    .fetch_all(pool)
    .await
}

/// Today's events grouped by hour of day (00-23).
pub async fn hourly_buckets(pool: &SqlitePool, date: &str) -> Result<Vec<HourlyBucket>, sqlx::Error> {
    sqlx::query_as(
        "SELECT strftime('%H', visit_time) AS hour, COUNT(*) AS visits
         FROM visitor_stats
         WHERE DATE(visit_time) = ?
         GROUP BY hour
         ORDER BY hour",
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

/// Truncate both visit tables. Irreversible.
pub async fn reset(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM visitor_stats").execute(pool).await?;
    sqlx::query("DELETE FROM daily_stats").execute(pool).await?;
    Ok(())
}

/// Classify a user agent as Mobile, Tablet or Desktop by substring match.
pub fn device_type(user_agent: &str) -> &'static str {
    if user_agent.contains("Mobile") {
        "Mobile"
    } else if user_agent.contains("Tablet") {
        "Tablet"
    } else {
        "Desktop"
    }
}
