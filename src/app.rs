// src/app.rs
//! Router assembly and the request pipeline
//!
//! Layers, outermost first: trace span, request id, timeout, security
//! headers, CORS, body-size limit, debug body logging, general API limiter,
//! route-class limiter, session, role gate, handler.

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use crate::auth::{auth_routes, require_session};
use crate::common::{AppConfig, AppState};
use crate::logging_middleware::{log_request_response, request_id};
use crate::rate_limit_middleware::rate_limit_middleware;
use crate::security_middleware::{request_size_limiter, security_headers_middleware};
use crate::services::rate_limit::RouteClass;
use crate::{admin, attendance, events, first_timers, prayer_requests, sermons, service_types, testimonies};

/// GET / - Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({
        "message": "RCCG Salvation Centre Backend API is running!",
        "status": "ok",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /api - API index
pub async fn api_index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to RCCG Salvation Centre API",
        "version": "1.0",
    }))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .allow_credentials(true)
}

/// Every `/api/admin/*` route: admin limiter, then session, then the per-route role gate
fn admin_routes() -> Router {
    Router::new()
        .merge(admin::admin_overview_routes())
        .merge(sermons::admin_sermon_routes())
        .merge(testimonies::admin_testimony_routes())
        .merge(first_timers::admin_first_timer_routes())
        .merge(attendance::admin_attendance_routes())
        .merge(prayer_requests::admin_prayer_request_routes())
        .merge(events::admin_event_routes())
        .route_layer(middleware::from_fn(require_session))
        .route_layer(middleware::from_fn_with_state(
            RouteClass::Admin,
            rate_limit_middleware,
        ))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    let auth = auth_routes().route_layer(middleware::from_fn_with_state(
        RouteClass::Auth,
        rate_limit_middleware,
    ));

    let api = Router::new()
        .route("/api", get(api_index))
        .route("/api/", get(api_index))
        .merge(sermons::sermon_routes())
        .merge(service_types::service_type_routes())
        .merge(testimonies::testimony_routes())
        .merge(first_timers::first_timer_routes())
        .merge(prayer_requests::prayer_request_routes())
        .merge(events::event_routes())
        .merge(auth)
        .merge(admin_routes())
        .route_layer(middleware::from_fn_with_state(
            RouteClass::Api,
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(health))
        .merge(api)
        .layer(DefaultBodyLimit::max(
            usize::try_from(config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(middleware::from_fn(log_request_response))
        .layer(middleware::from_fn_with_state(
            config.max_body_bytes,
            request_size_limiter,
        ))
        .layer(cors_layer(&config))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(state))
}
