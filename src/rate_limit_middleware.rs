// rate_limit_middleware.rs
use crate::common::{ApiError, AppState};
use crate::services::rate_limit::{RateLimitResult, RouteClass};
use axum::{
    extract::{ConnectInfo, Extension, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extract IP address from request
///
/// Forwarding headers are only read when `trust_proxy_headers` is set.
pub fn extract_ip_address(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
    trust_proxy_headers: bool,
) -> Option<String> {
    if !trust_proxy_headers {
        return connect_info.map(|info| info.0.ip().to_string());
    }

    // Try X-Forwarded-For header first (for proxied requests)
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            // Take the first IP in the chain
            if let Some(first_ip) = forwarded_str.split(',').next() {
                let first_ip = first_ip.trim();
                if !first_ip.is_empty() {
                    return Some(first_ip.to_string());
                }
            }
        }
    }

    // Try X-Real-IP header
    if let Some(real_ip) = headers.get("x-real-ip") {
        if let Ok(ip_str) = real_ip.to_str() {
            let ip_str = ip_str.trim();
            if !ip_str.is_empty() {
                return Some(ip_str.to_string());
            }
        }
    }

    // Fall back to connection info
    connect_info.map(|info| info.0.ip().to_string())
}

/// Rate limiting middleware for one route class
///
/// Attach with `from_fn_with_state(RouteClass::Auth, rate_limit_middleware)`.
pub async fn rate_limit_middleware(
    State(class): State<RouteClass>,
    Extension(state): Extension<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let limiters = &state.rate_limiters;
    let client_ip = extract_ip_address(
        request.headers(),
        connect_info.as_ref(),
        limiters.config.trust_proxy_headers,
    )
    .unwrap_or_else(|| "unknown".to_string());

    let limiter = limiters.for_class(class);

    match limiters.check(limiter, &client_ip).await {
        RateLimitResult::Allowed => {
            debug!(
                limiter = limiter.name(),
                ip = %client_ip,
                path = %request.uri().path(),
                "Request allowed by rate limiter"
            );
            Ok(next.run(request).await)
        }
        RateLimitResult::Limited { retry_after } => {
            warn!(
                limiter = limiter.name(),
                ip = %client_ip,
                path = %request.uri().path(),
                retry_after = retry_after,
                "Request blocked by rate limiter"
            );
            Err(ApiError::TooManyRequests {
                message: "Rate limit exceeded. Please try again later.".to_string(),
                retry_after,
            })
        }
    }
}
