use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sermon {
    pub id: i64,
    pub title: String,
    pub pastor: String,
    pub service: String,
    pub date: String,
    pub youtube_id: String,
    pub duration: String,
    pub description: String,
    pub published: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSermonRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pastor: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub youtube_id: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published: bool,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSermonRequest {
    pub title: Option<String>,
    pub pastor: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub youtube_id: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub published: Option<bool>,
}

impl Sermon {
    pub fn apply(&mut self, update: UpdateSermonRequest) {
        if let Some(title) = update.title {
            self.title = title.trim().to_string();
        }
        if let Some(pastor) = update.pastor {
            self.pastor = pastor.trim().to_string();
        }
        if let Some(service) = update.service {
            self.service = service.trim().to_string();
        }
        if let Some(date) = update.date {
            self.date = date.trim().to_string();
        }
        if let Some(youtube_id) = update.youtube_id {
            self.youtube_id = youtube_id.trim().to_string();
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(published) = update.published {
            self.published = published;
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SermonListResponse {
    pub data: Vec<Sermon>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SermonSearchResponse {
    pub query: String,
    pub count: usize,
    pub data: Vec<Sermon>,
}

#[derive(Debug, Serialize)]
pub struct SermonMutationResponse {
    pub message: String,
    pub sermon: Sermon,
}
