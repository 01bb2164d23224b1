use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, SECRETARIAT, SUPERADMIN_ONLY};
use crate::rate_limit_middleware::rate_limit_middleware;
use crate::services::rate_limit::RouteClass;
use axum::{
    handler::Handler,
    middleware,
    routing::{get, put},
    Router,
};

/// Public testimony routes; submissions have their own limiter
pub fn testimony_routes() -> Router {
    Router::new().route(
        "/api/testimonies",
        get(handlers::list_testimonies).post(handlers::submit_testimony.layer(
            middleware::from_fn_with_state(RouteClass::Testimonies, rate_limit_middleware),
        )),
    )
}

pub fn admin_testimony_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/testimonies",
            get(handlers::admin_list_testimonies
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles))),
        )
        .route(
            "/api/admin/testimonies/:id",
            put(handlers::review_testimony
                .layer(middleware::from_fn_with_state(SECRETARIAT, require_roles)))
            .delete(handlers::delete_testimony
                .layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))),
        )
}
