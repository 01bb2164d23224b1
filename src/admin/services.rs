// src/admin/services.rs

use chrono::{Days, Months, NaiveDate};
use sqlx::SqlitePool;
use tracing::error;

use super::models::{AttendanceStat, DashboardStats, UpcomingEvent};
use crate::common::{validation::DATE_FORMAT, ApiError};

const UPCOMING_EVENTS_LIMIT: i64 = 6;

/// Week-over-week change in total attendance
pub fn attendance_trend(this_week: i64, last_week: i64) -> String {
    if last_week <= 0 {
        return "No change".to_string();
    }

    let diff = (this_week - last_week) as f64 / last_week as f64 * 100.0;
    if diff > 0.0 {
        format!("+{:.0}% from last week", diff)
    } else if diff < 0.0 {
        format!("{:.0}% from last week", diff)
    } else {
        "No change".to_string()
    }
}

pub struct DashboardService {
    db: SqlitePool,
}

impl DashboardService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn count(&self, sql: &str, bind: Option<&str>, what: &str) -> Result<i64, ApiError> {
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        if let Some(value) = bind {
            query = query.bind(value.to_string());
        }
        query.fetch_one(&self.db).await.map_err(|e| {
            error!(error = %e, metric = what, "Database error fetching dashboard metric");
            ApiError::DatabaseError(e)
        })
    }

    /// Dashboard figures relative to `today`
    pub async fn stats(&self, today: NaiveDate) -> Result<DashboardStats, ApiError> {
        let today_str = today.format(DATE_FORMAT).to_string();
        let week_start = (today - Days::new(7)).format(DATE_FORMAT).to_string();
        let previous_week_start = (today - Days::new(14)).format(DATE_FORMAT).to_string();
        let month_start = today
            .checked_sub_months(Months::new(1))
            .unwrap_or(today)
            .format(DATE_FORMAT)
            .to_string();

        let total_sermons = self
            .count("SELECT COUNT(*) FROM sermons", None, "total_sermons")
            .await?;

        let pending_testimonies = self
            .count(
                "SELECT COUNT(*) FROM testimonies WHERE status = 'pending'",
                None,
                "pending_testimonies",
            )
            .await?;

        let todays_first_timers = self
            .count(
                "SELECT COUNT(*) FROM first_timers WHERE visit_date = ?",
                Some(&today_str),
                "todays_first_timers",
            )
            .await?;

        let upcoming_events = sqlx::query_as::<_, UpcomingEvent>(
            r#"
            SELECT id, title, date FROM special_events
            WHERE published = 1 AND date >= ?
            ORDER BY date ASC, id ASC
            LIMIT ?
            "#,
        )
        .bind(&today_str)
        .bind(UPCOMING_EVENTS_LIMIT)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching upcoming events");
            ApiError::DatabaseError(e)
        })?;

        let attendance_stats = sqlx::query_as::<_, AttendanceStat>(
            "SELECT date, total, adults, children FROM attendance WHERE date >= ? ORDER BY date ASC, id ASC",
        )
        .bind(&month_start)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching attendance stats");
            ApiError::DatabaseError(e)
        })?;

        let this_week = self
            .count(
                "SELECT COALESCE(SUM(total), 0) FROM attendance WHERE date >= ?",
                Some(&week_start),
                "this_week_attendance",
            )
            .await?;

        let last_week = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(total), 0) FROM attendance WHERE date >= ? AND date < ?",
        )
        .bind(&previous_week_start)
        .bind(&week_start)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching last week attendance");
            ApiError::DatabaseError(e)
        })?;

        Ok(DashboardStats {
            total_sermons,
            pending_testimonies,
            todays_first_timers,
            upcoming_events,
            attendance_stats,
            attendance_trend: attendance_trend(this_week, last_week),
        })
    }
}
