use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub date: String,
    pub service_type: String,
    pub adults: i64,
    pub children: i64,
    pub total: i64,
    pub first_timers: i64,
    pub visitors: i64,
    pub members: i64,
    pub notes: String,
    pub recorded_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Attendance {
    /// Audit details, e.g. "Sunday Service on 2024-06-02"
    pub fn summary(&self) -> String {
        format!("{} on {}", self.service_type, self.date)
    }

    pub fn apply(&mut self, update: UpdateAttendanceRequest) {
        if let Some(service_type) = update.service_type {
            self.service_type = service_type.trim().to_string();
        }
        if let Some(adults) = update.adults {
            self.adults = adults;
        }
        if let Some(children) = update.children {
            self.children = children;
        }
        if let Some(total) = update.total {
            self.total = total;
        }
        if let Some(first_timers) = update.first_timers {
            self.first_timers = first_timers;
        }
        if let Some(visitors) = update.visitors {
            self.visitors = visitors;
        }
        if let Some(members) = update.members {
            self.members = members;
        }
        if let Some(notes) = update.notes {
            self.notes = notes;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRequest {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub adults: i64,
    #[serde(default)]
    pub children: i64,
    /// Defaults to adults + children
    pub total: Option<i64>,
    #[serde(default)]
    pub first_timers: i64,
    #[serde(default)]
    pub visitors: i64,
    #[serde(default)]
    pub members: i64,
    #[serde(default)]
    pub notes: String,
}

impl CreateAttendanceRequest {
    /// `None` when the default sum does not fit in an i64
    pub fn total(&self) -> Option<i64> {
        match self.total {
            Some(total) => Some(total),
            None => self.adults.checked_add(self.children),
        }
    }
}

/// Partial update; the service date is fixed once recorded
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRequest {
    pub service_type: Option<String>,
    pub adults: Option<i64>,
    pub children: Option<i64>,
    pub total: Option<i64>,
    pub first_timers: Option<i64>,
    pub visitors: Option<i64>,
    pub members: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AttendanceMutationResponse {
    pub message: String,
    pub attendance: Attendance,
}
