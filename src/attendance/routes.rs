use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, SECRETARIAT, SUPERADMIN_ONLY};
use axum::{
    handler::Handler,
    middleware,
    routing::{get, put},
    Router,
};

pub fn admin_attendance_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/attendance",
            get(handlers::list_attendance
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles)))
            .post(handlers::create_attendance
                .layer(middleware::from_fn_with_state(SECRETARIAT, require_roles))),
        )
        .route(
            "/api/admin/attendance/:id",
            put(handlers::update_attendance
                .layer(middleware::from_fn_with_state(SECRETARIAT, require_roles)))
            .delete(handlers::delete_attendance
                .layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))),
        )
}
