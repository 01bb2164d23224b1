// src/security_middleware.rs
//! Request size limiting and security response headers

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::common::{helpers::format_bytes, ApiError};

/// Rejects bodies larger than `max_bytes` with a 413 JSON response
///
/// A declared `Content-Length` is checked without reading; otherwise the body
/// is buffered up to the limit.
pub async fn request_size_limiter(
    State(max_bytes): State<u64>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let too_large = || {
        ApiError::PayloadTooLarge(format!(
            "Request body must not exceed {}",
            format_bytes(max_bytes)
        ))
    };

    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(len) if len > max_bytes => {
            warn!(
                content_length = len,
                limit = max_bytes,
                path = %request.uri().path(),
                "Request body too large"
            );
            Err(too_large())
        }
        Some(_) => Ok(next.run(request).await),
        None => {
            let (parts, body) = request.into_parts();
            let limit = usize::try_from(max_bytes).unwrap_or(usize::MAX);
            let bytes = to_bytes(body, limit).await.map_err(|e| {
                warn!(error = %e, path = %parts.uri.path(), "Request body exceeded limit");
                too_large()
            })?;
            let request = Request::from_parts(parts, Body::from(bytes));
            Ok(next.run(request).await)
        }
    }
}

/// Adds the fixed set of security headers to every response
pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static(
            "geolocation=(), midi=(), sync-xhr=(), microphone=(), camera=(), magnetometer=(), gyroscope=(), fullscreen=(self), payment=()",
        ),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'self'; frame-ancestors 'none';"),
    );
    headers.remove(header::SERVER);

    response
}
