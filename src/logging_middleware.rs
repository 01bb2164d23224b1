// src/logging_middleware.rs
//! Request tagging and debug-level body logging with redaction

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::Request,
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use tracing::{debug, enabled, Level};
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Largest response body buffered for the debug log
const MAX_LOGGED_RESPONSE_BYTES: usize = 64 * 1024;

const REDACTED_FIELDS: &[&str] = &[
    "idToken",
    "sessionCookie",
    "email",
    "adminEmail",
    "phone",
    "address",
    "dateOfBirth",
    "prayerRequest",
    "request",
];

/// Replaces personal and credential fields anywhere in a JSON document
pub fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if REDACTED_FIELDS.contains(&key.as_str()) {
                    *field = Value::String("[REDACTED]".to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}

fn loggable(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(mut json) => {
            redact(&mut json);
            Some(json.to_string())
        }
        Err(_) => Some(format!("<{} bytes non-JSON>", bytes.len())),
    }
}

/// Ensures every request and response carries an `x-request-id`
pub async fn request_id(mut request: Request, next: Next) -> Response {
    let id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok());

    if let Some(id) = &id {
        request.headers_mut().insert(REQUEST_ID_HEADER.clone(), id.clone());
    }

    let mut response = next.run(request).await;
    if let Some(id) = id {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), id);
    }
    response
}

/// Middleware to log request and response bodies in debug mode
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let request_id = parts
        .headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if let Some(body) = loggable(&bytes) {
        debug!(
            request_id = %request_id,
            method = %parts.method,
            uri = %parts.uri,
            request_body = %body,
            "Request"
        );
    }

    let request = Request::from_parts(parts, Body::from(bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();

    // Streamed or large bodies go out untouched
    let fits = body
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_RESPONSE_BYTES as u64);
    if !fits {
        debug!(
            request_id = %request_id,
            status = %parts.status,
            "Response body too large to log"
        );
        return Ok(Response::from_parts(parts, body));
    }

    let bytes = to_bytes(body, MAX_LOGGED_RESPONSE_BYTES)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(body) = loggable(&bytes) {
        debug!(
            request_id = %request_id,
            status = %parts.status,
            response_body = %body,
            "Response"
        );
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}
