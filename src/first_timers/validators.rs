use super::models::{CreateFirstTimerRequest, UpdateFirstTimerRequest};
use crate::common::{validation::parse_date, ValidationResult, Validator};

impl Validator<CreateFirstTimerRequest> for CreateFirstTimerRequest {
    fn validate(&self, data: &CreateFirstTimerRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("firstName", &data.first_name, "First name is required");
        result.require("lastName", &data.last_name, "Last name is required");
        result.max_len("firstName", &data.first_name, 100);
        result.max_len("lastName", &data.last_name, 100);
        result.email("email", &data.email);

        if data.visit_date.trim().is_empty() {
            result.add_error("visitDate", "Visit date is required");
        } else if parse_date(&data.visit_date).is_none() {
            result.add_error("visitDate", "Invalid visit date format. Use YYYY-MM-DD");
        }

        // Free text: forms send birthdays in whatever format the visitor typed
        result.max_len("dateOfBirth", &data.date_of_birth, 50);

        result
    }
}

impl Validator<UpdateFirstTimerRequest> for UpdateFirstTimerRequest {
    fn validate(&self, data: &UpdateFirstTimerRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(follow_up_status) = &data.follow_up_status {
            result.require("followUpStatus", follow_up_status, "Follow-up status cannot be empty");
            result.max_len("followUpStatus", follow_up_status, 50);
        }
        if let Some(status) = &data.status {
            result.require("status", status, "Status cannot be empty");
            result.max_len("status", status, 50);
        }

        result
    }
}
