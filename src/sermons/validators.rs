use super::models::{CreateSermonRequest, UpdateSermonRequest};
use crate::common::{ValidationResult, Validator};

impl Validator<CreateSermonRequest> for CreateSermonRequest {
    fn validate(&self, data: &CreateSermonRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", &data.title, "Title is required");
        result.require("pastor", &data.pastor, "Pastor is required");
        result.require("service", &data.service, "Service is required");
        result.require("youtubeId", &data.youtube_id, "YouTube ID is required");
        result.max_len("title", &data.title, 255);

        if data.date.trim().is_empty() {
            result.add_error("date", "Date is required");
        } else {
            result.date("date", &data.date);
        }

        result
    }
}

impl Validator<UpdateSermonRequest> for UpdateSermonRequest {
    fn validate(&self, data: &UpdateSermonRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require("title", title, "Title cannot be empty");
            result.max_len("title", title, 255);
        }
        if let Some(youtube_id) = &data.youtube_id {
            result.require("youtubeId", youtube_id, "YouTube ID cannot be empty");
        }
        if let Some(date) = &data.date {
            result.date("date", date);
        }

        result
    }
}
