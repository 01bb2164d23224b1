use super::models::{CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::common::{ValidationResult, Validator};

fn non_negative(result: &mut ValidationResult, field: &str, value: i64) {
    if value < 0 {
        result.add_error(field, "must not be negative");
    }
}

impl Validator<CreateAttendanceRequest> for CreateAttendanceRequest {
    fn validate(&self, data: &CreateAttendanceRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.date.trim().is_empty() {
            result.add_error("date", "Date is required");
        } else {
            result.date("date", &data.date);
        }
        result.require("serviceType", &data.service_type, "Service type is required");

        non_negative(&mut result, "adults", data.adults);
        non_negative(&mut result, "children", data.children);
        match data.total() {
            Some(total) => non_negative(&mut result, "total", total),
            None => result.add_error("total", "adults plus children is too large"),
        }
        non_negative(&mut result, "firstTimers", data.first_timers);
        non_negative(&mut result, "visitors", data.visitors);
        non_negative(&mut result, "members", data.members);

        result
    }
}

impl Validator<UpdateAttendanceRequest> for UpdateAttendanceRequest {
    fn validate(&self, data: &UpdateAttendanceRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if let Some(service_type) = &data.service_type {
            result.require("serviceType", service_type, "Service type cannot be empty");
        }

        let counts = [
            ("adults", data.adults),
            ("children", data.children),
            ("total", data.total),
            ("firstTimers", data.first_timers),
            ("visitors", data.visitors),
            ("members", data.members),
        ];
        for (field, value) in counts {
            if let Some(value) = value {
                non_negative(&mut result, field, value);
            }
        }

        result
    }
}
