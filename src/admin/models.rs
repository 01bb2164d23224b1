// src/admin/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::services::audit::ActivityLog;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UpcomingEvent {
    pub id: i64,
    pub title: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttendanceStat {
    pub date: String,
    pub total: i64,
    pub adults: i64,
    pub children: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_sermons: i64,
    pub pending_testimonies: i64,
    pub todays_first_timers: i64,
    pub upcoming_events: Vec<UpcomingEvent>,
    pub attendance_stats: Vec<AttendanceStat>,
    pub attendance_trend: String,
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

impl ActivityQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 100;

    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub data: Vec<ActivityLog>,
}
