use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, SUPERADMIN_ONLY, VISITOR_WELFARE};
use crate::rate_limit_middleware::rate_limit_middleware;
use crate::services::rate_limit::RouteClass;
use axum::{
    handler::Handler,
    middleware,
    routing::{get, post, put},
    Router,
};

pub fn first_timer_routes() -> Router {
    Router::new().route(
        "/api/first-timers",
        post(handlers::register_first_timer.layer(middleware::from_fn_with_state(
            RouteClass::FirstTimers,
            rate_limit_middleware,
        ))),
    )
}

pub fn admin_first_timer_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/first-timers",
            get(handlers::admin_list_first_timers
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles))),
        )
        .route(
            "/api/admin/first-timers/:id",
            put(handlers::update_first_timer
                .layer(middleware::from_fn_with_state(VISITOR_WELFARE, require_roles)))
            .delete(handlers::delete_first_timer
                .layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))),
        )
}
