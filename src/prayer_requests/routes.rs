use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, SECRETARIAT};
use crate::rate_limit_middleware::rate_limit_middleware;
use crate::services::rate_limit::RouteClass;
use axum::{
    handler::Handler,
    middleware,
    routing::{get, post, put},
    Router,
};

pub fn prayer_request_routes() -> Router {
    Router::new().route(
        "/api/prayer-requests",
        post(handlers::submit_prayer_request.layer(middleware::from_fn_with_state(
            RouteClass::PrayerRequests,
            rate_limit_middleware,
        ))),
    )
}

pub fn admin_prayer_request_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/prayer-requests",
            get(handlers::admin_list_prayer_requests
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles))),
        )
        .route(
            "/api/admin/prayer-requests/:id",
            put(handlers::update_prayer_request
                .layer(middleware::from_fn_with_state(SECRETARIAT, require_roles)))
            .delete(handlers::delete_prayer_request
                .layer(middleware::from_fn_with_state(SECRETARIAT, require_roles))),
        )
}
