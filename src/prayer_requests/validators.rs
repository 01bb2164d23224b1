use super::models::{CreatePrayerRequest, UpdatePrayerRequest, PRAYER_STATUSES};
use crate::common::{validation::is_valid_email, ValidationResult, Validator};

impl Validator<CreatePrayerRequest> for CreatePrayerRequest {
    fn validate(&self, data: &CreatePrayerRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("name", &data.name, "Name is required");
        result.require("request", &data.request, "Prayer request is required");
        result.max_len("name", &data.name, 255);
        result.max_len("request", &data.request, 5_000);

        if data.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_valid_email(&data.email) {
            result.add_error("email", "Invalid email address");
        }

        result
    }
}

/// Status is checked separately so it can be reported as a plain "Invalid status"
pub fn is_valid_status(status: &str) -> bool {
    PRAYER_STATUSES.contains(&status)
}

impl Validator<UpdatePrayerRequest> for UpdatePrayerRequest {
    fn validate(&self, data: &UpdatePrayerRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(name) = &data.name {
            result.require("name", name, "Name cannot be empty");
        }
        if let Some(email) = &data.email {
            if !is_valid_email(email) {
                result.add_error("email", "Invalid email address");
            }
        }
        if let Some(request) = &data.request {
            result.require("request", request, "Prayer request cannot be empty");
        }

        result
    }
}
