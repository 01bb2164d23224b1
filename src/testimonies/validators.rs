use super::models::CreateTestimonyRequest;
use crate::common::{ValidationResult, Validator};

impl Validator<CreateTestimonyRequest> for CreateTestimonyRequest {
    fn validate(&self, data: &CreateTestimonyRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.require("name", &data.name, "Name is required");
        result.require("title", &data.title, "Title is required");
        result.require("message", &data.message, "Message is required");
        result.max_len("name", &data.name, 255);
        result.max_len("title", &data.title, 255);
        result.max_len("message", &data.message, 10_000);
        result.email("email", &data.email);

        result
    }
}
