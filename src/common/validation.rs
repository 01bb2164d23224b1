// Common validation types and traits

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Wire format for every calendar date the API accepts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    /// Records an error when `value` is blank
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add_error(field, message);
        }
    }

    /// Records an error when `value` exceeds `max` characters
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add_error(field, &format!("must not exceed {} characters", max));
        }
    }

    /// Records an error when `value` is not a YYYY-MM-DD date
    pub fn date(&mut self, field: &str, value: &str) {
        if parse_date(value).is_none() {
            self.add_error(field, "Invalid date format. Use YYYY-MM-DD");
        }
    }

    /// Records an error when a non-empty `value` is not an email address
    pub fn email(&mut self, field: &str, value: &str) {
        if !value.is_empty() && !is_valid_email(value) {
            self.add_error(field, "Invalid email address");
        }
    }

    pub fn into_result(self) -> Result<(), super::ApiError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn is_valid_email(value: &str) -> bool {
    static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value.trim()))
}
