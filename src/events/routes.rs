use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, EVENT_MANAGERS};
use axum::{
    handler::Handler,
    middleware,
    routing::{get, put},
    Router,
};

pub fn event_routes() -> Router {
    Router::new()
        .route("/api/special-events", get(handlers::list_special_events))
        .route("/api/regular-programs", get(handlers::list_regular_programs))
}

pub fn admin_event_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/special-events",
            get(handlers::admin_list_special_events
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles)))
            .post(handlers::create_special_event
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles))),
        )
        .route(
            "/api/admin/special-events/:id",
            put(handlers::update_special_event
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles)))
            .delete(handlers::delete_special_event
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles))),
        )
        .route(
            "/api/admin/regular-programs",
            get(handlers::admin_list_regular_programs
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles)))
            .post(handlers::create_regular_program
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles))),
        )
        .route(
            "/api/admin/regular-programs/:id",
            put(handlers::update_regular_program
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles)))
            .delete(handlers::delete_regular_program
                .layer(middleware::from_fn_with_state(EVENT_MANAGERS, require_roles))),
        )
}
