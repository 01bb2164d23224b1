// src/admin/routes.rs

use axum::{handler::Handler, middleware, routing::get, Router};

use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, SUPERADMIN_ONLY};

pub fn admin_overview_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/dashboard",
            get(handlers::dashboard::get_dashboard
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles))),
        )
        .route(
            "/api/admin/activity",
            get(handlers::activity::get_recent_activity
                .layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))),
        )
}
