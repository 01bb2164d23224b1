use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// Special events
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEvent {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub event_type: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSpecialEventRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub published: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecialEventRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub published: Option<bool>,
}

impl SpecialEvent {
    pub fn apply(&mut self, update: UpdateSpecialEventRequest) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(event_type) = update.event_type {
            self.event_type = event_type.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(date) = update.date {
            self.date = date.trim().to_string();
        }
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(published) = update.published {
            self.published = published;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SpecialEventResponse {
    pub message: String,
    pub event: SpecialEvent,
}

// ============================================================================
// Regular programs
// ============================================================================

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RegularProgram {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub day: String,
    pub frequency: String,
    pub time: String,
    pub location: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub program_type: String,
    pub active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegularProgramRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub program_type: String,
    /// New programs are active unless stated otherwise
    pub active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegularProgramRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub day: Option<String>,
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub program_type: Option<String>,
    pub active: Option<bool>,
}

impl RegularProgram {
    pub fn apply(&mut self, update: UpdateRegularProgramRequest) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(day) = update.day {
            self.day = day.trim().to_string();
        }
        if let Some(frequency) = update.frequency {
            self.frequency = frequency.trim().to_string();
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(program_type) = update.program_type {
            self.program_type = program_type.trim().to_string();
        }
        if let Some(active) = update.active {
            self.active = active;
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RegularProgramResponse {
    pub message: String,
    pub program: RegularProgram,
}
