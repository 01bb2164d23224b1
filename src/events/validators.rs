use super::models::{
    CreateRegularProgramRequest, CreateSpecialEventRequest, UpdateRegularProgramRequest,
    UpdateSpecialEventRequest,
};
use crate::common::{ValidationResult, Validator};

impl Validator<CreateSpecialEventRequest> for CreateSpecialEventRequest {
    fn validate(&self, data: &CreateSpecialEventRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", &data.title, "Title is required");
        result.require("type", &data.event_type, "Type is required");
        result.max_len("title", &data.title, 255);

        if data.date.trim().is_empty() {
            result.add_error("date", "Date is required");
        } else {
            result.date("date", &data.date);
        }

        result
    }
}

impl Validator<UpdateSpecialEventRequest> for UpdateSpecialEventRequest {
    fn validate(&self, data: &UpdateSpecialEventRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(title) = &data.title {
            result.require("title", title, "Title cannot be empty");
        }
        if let Some(event_type) = &data.event_type {
            result.require("type", event_type, "Type cannot be empty");
        }
        if let Some(date) = &data.date {
            result.date("date", date);
        }

        result
    }
}

impl Validator<CreateRegularProgramRequest> for CreateRegularProgramRequest {
    fn validate(&self, data: &CreateRegularProgramRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("title", &data.title, "Title is required");
        result.require("day", &data.day, "Day is required");
        result.require("frequency", &data.frequency, "Frequency is required");
        result.require("type", &data.program_type, "Type is required");
        result.max_len("title", &data.title, 255);

        result
    }
}

impl Validator<UpdateRegularProgramRequest> for UpdateRegularProgramRequest {
    fn validate(&self, data: &UpdateRegularProgramRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        let required = [
            ("title", &data.title),
            ("day", &data.day),
            ("frequency", &data.frequency),
            ("type", &data.program_type),
        ];
        for (field, value) in required {
            if let Some(value) = value {
                result.require(field, value, "cannot be empty");
            }
        }

        result
    }
}
