use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const PRAYER_STATUSES: &[&str] = &["pending", "prayed", "archived"];

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub request: String,
    pub status: String,
    pub submitted_at: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePrayerRequest {
    pub name: String,
    pub email: String,
    pub request: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePrayerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub request: Option<String>,
    pub status: Option<String>,
}

impl PrayerRequest {
    pub fn apply(&mut self, update: UpdatePrayerRequest) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = email.trim().to_string();
        }
        if let Some(request) = update.request {
            self.request = request.trim().to_string();
        }
        if let Some(status) = update.status {
            self.status = status.trim().to_string();
        }
    }
}

/// Envelope used by every prayer request endpoint
#[derive(Debug, Serialize)]
pub struct PrayerRequestResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> PrayerRequestResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: &str, data: Option<T>) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            data,
        }
    }
}
