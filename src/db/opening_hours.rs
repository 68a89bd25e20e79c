//! Opening hours storage and schedule derivation
//!
//! Seven fixed rows, Monday=1 .. Sunday=7. Rows are only updated. The
//! derived display text lives here rather than in the frontend because
//! its edge cases (placeholder "0" values, half-configured intervals)
//! are easy to get wrong.

use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OpeningHours {
    pub id: i64,
    pub day_of_week: i64,
    pub day_name: String,
    pub open_time_1: Option<String>,
    pub close_time_1: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
    pub closed: bool,
    pub vacation_start: Option<String>,
    pub vacation_end: Option<String>,
    pub vacation_active: bool,
}

impl OpeningHours {
    /// True when the vacation override applies on `date` (YYYY-MM-DD).
    /// Date strings in this format compare correctly as text.
    pub fn is_on_vacation(&self, date: &str) -> bool {
        if !self.vacation_active {
            return false;
        }
        match (&self.vacation_start, &self.vacation_end) {
            (Some(start), Some(end)) => start.as_str() <= date && date <= end.as_str(),
            _ => false,
        }
    }

    /// Rendered schedule line for this day.
    pub fn display_text(&self, date: &str) -> String {
        if self.closed {
            return "Closed".to_string();
        }
        if self.is_on_vacation(date) {
            return "On vacation".to_string();
        }

        let mut result = String::new();
        if let (Some(open), Some(close)) = (
            present(self.open_time_1.as_deref()),
            present(self.close_time_1.as_deref()),
        ) {
            result = format!("{open} - {close}");
        }
        if let (Some(open), Some(close)) = (
            present(self.open_time_2.as_deref()),
            present(self.close_time_2.as_deref()),
        ) {
            if result.is_empty() {
                result = format!("{open} - {close}");
            } else {
                result.push_str(&format!(" & {open} - {close}"));
            }
        }

        if result.is_empty() {
            "Closed".to_string()
        } else {
            result
        }
    }
}

/// Presence test for a stored time value: legacy rows carry "", "0" or
/// "null" instead of NULL.
fn present(time: Option<&str>) -> Option<&str> {
    let t = time?.trim();
    if t.is_empty() || t == "0" || t == "null" {
        None
    } else {
        Some(t)
    }
}

/// The 7 rows in fixed weekday order (never natural string order).
pub async fn list(pool: &SqlitePool) -> Result<Vec<OpeningHours>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, day_of_week, day_name, open_time_1, close_time_1, open_time_2, close_time_2,
                closed, vacation_start, vacation_end, vacation_active
         FROM opening_hours
         ORDER BY day_of_week ASC",
    )
    .fetch_all(pool)
    .await
}

/// Overwrite the interval pairs, closed flag and vacation window of one
/// row. Cardinality never changes; there is no create or delete.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    open_time_1: Option<&str>,
    close_time_1: Option<&str>,
    open_time_2: Option<&str>,
    close_time_2: Option<&str>,
    closed: bool,
    vacation_start: Option<&str>,
    vacation_end: Option<&str>,
    vacation_active: bool,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE opening_hours
         SET open_time_1 = ?, close_time_1 = ?, open_time_2 = ?, close_time_2 = ?,
             closed = ?, vacation_start = ?, vacation_end = ?, vacation_active = ?
         WHERE id = ?",
    )
    .bind(open_time_1)
    .bind(close_time_1)
    .bind(open_time_2)
    .bind(close_time_2)
    .bind(closed)
    .bind(vacation_start)
    .bind(vacation_end)
    .bind(vacation_active)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
