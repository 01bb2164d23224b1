use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FirstTimer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub date_of_birth: String,
    pub gender: String,
    pub marital_status: String,
    pub occupation: String,
    pub visit_date: String,
    pub how_did_you_hear: String,
    pub prayer_request: String,
    pub interested_in_membership: bool,
    pub follow_up_status: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl FirstTimer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateFirstTimerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub date_of_birth: String,
    pub gender: String,
    pub marital_status: String,
    pub occupation: String,
    pub visit_date: String,
    pub how_did_you_hear: String,
    pub prayer_request: String,
    pub interested_in_membership: bool,
}

/// Follow-up fields staff may change
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFirstTimerRequest {
    pub follow_up_status: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstTimerUpdateResponse {
    pub message: String,
    pub first_timer: FirstTimer,
}
