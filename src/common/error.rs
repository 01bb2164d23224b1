// Error handling types for the API

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::fmt;
use tracing::error;

use super::validation::ValidationResult;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    TooManyRequests { message: String, retry_after: u64 },
    InternalServer(String),
    DatabaseError(sqlx::Error),
    ValidationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload Too Large: {}", msg),
            ApiError::TooManyRequests { message, .. } => write!(f, "Too Many Requests: {}", message),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::DatabaseError(e) => write!(f, "Database Error: {}", e),
            ApiError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<u64>,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::InternalServer(_) | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let mut retry_header = None;

        let body = match self {
            // Auth failures carry their prefix in the body so clients can tell them apart
            err @ (ApiError::Unauthorized(_) | ApiError::Forbidden(_)) => {
                let code = if matches!(err, ApiError::Unauthorized(_)) {
                    "UNAUTHORIZED"
                } else {
                    "FORBIDDEN"
                };
                ErrorResponse {
                    error: err.to_string(),
                    message: None,
                    retry_after_seconds: None,
                    code: code.to_string(),
                }
            }
            ApiError::BadRequest(msg) => simple(msg, "BAD_REQUEST"),
            ApiError::ValidationError(msg) => simple(msg, "VALIDATION_ERROR"),
            ApiError::NotFound(msg) => simple(msg, "NOT_FOUND"),
            ApiError::Conflict(msg) => simple(msg, "CONFLICT"),
            ApiError::PayloadTooLarge(msg) => ErrorResponse {
                error: "Payload too large".to_string(),
                message: Some(msg),
                retry_after_seconds: None,
                code: "PAYLOAD_TOO_LARGE".to_string(),
            },
            ApiError::TooManyRequests {
                message,
                retry_after,
            } => {
                retry_header = HeaderValue::from_str(&retry_after.to_string()).ok();
                ErrorResponse {
                    error: "Too many requests".to_string(),
                    message: Some(message),
                    retry_after_seconds: Some(retry_after),
                    code: "RATE_LIMIT_EXCEEDED".to_string(),
                }
            }
            ApiError::InternalServer(msg) => simple(msg, "INTERNAL_SERVER_ERROR"),
            ApiError::DatabaseError(e) => {
                error!(error = %e, "Database error occurred");
                simple("Database operation failed".to_string(), "DATABASE_ERROR")
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let Some(value) = retry_header {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
        response
    }
}

fn simple(error: String, code: &str) -> ErrorResponse {
    ErrorResponse {
        error,
        message: None,
        retry_after_seconds: None,
        code: code.to_string(),
    }
}

/// Helper function to convert ValidationResult to ApiError
impl From<ValidationResult> for ApiError {
    fn from(result: ValidationResult) -> Self {
        if result.is_valid {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            let error_messages: Vec<String> = result
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            ApiError::ValidationError(error_messages.join(", "))
        }
    }
}

/// Malformed or missing JSON bodies are a plain 400
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::BadRequest("Invalid id".to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Maps a UNIQUE constraint violation to a conflict, everything else to a database error
pub fn map_unique_violation(e: sqlx::Error, conflict_message: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.message().contains("UNIQUE constraint failed") {
            return ApiError::Conflict(conflict_message.to_string());
        }
    }
    ApiError::DatabaseError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value, Option<String>) {
        let response = err.into_response();
        let status = response.status();
        let retry = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap(), retry)
    }

    #[tokio::test]
    async fn test_unauthorized_body_carries_prefix() {
        let (status, body, _) =
            body_json(ApiError::Unauthorized("No session found".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized: No session found");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_rate_limited_body_and_header() {
        let (status, body, retry) = body_json(ApiError::TooManyRequests {
            message: "Rate limit exceeded. Please try again later.".to_string(),
            retry_after: 900,
        })
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "Too many requests");
        assert_eq!(body["retry_after_seconds"], 900);
        assert_eq!(retry.as_deref(), Some("900"));
    }

    #[tokio::test]
    async fn test_database_error_is_not_leaked() {
        let (status, body, _) = body_json(ApiError::DatabaseError(sqlx::Error::RowNotFound)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Database operation failed");
    }

    #[test]
    fn test_validation_result_message_joins_fields() {
        let mut result = ValidationResult::new();
        result.add_error("title", "Title is required");
        result.add_error("date", "Invalid date format. Use YYYY-MM-DD");
        match ApiError::from(result) {
            ApiError::ValidationError(msg) => {
                assert_eq!(
                    msg,
                    "title: Title is required, date: Invalid date format. Use YYYY-MM-DD"
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
