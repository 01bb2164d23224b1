use super::handlers;
use crate::auth::rbac::{require_roles, ANY_ADMIN, MEDIA_EDITORS, SUPERADMIN_ONLY};
use axum::{
    handler::Handler,
    middleware,
    routing::{get, put},
    Router,
};

/// Public sermon routes
pub fn sermon_routes() -> Router {
    Router::new()
        .route("/api/sermons", get(handlers::list_sermons))
        .route("/api/sermons/latest", get(handlers::latest_sermon))
        .route("/api/sermons/search", get(handlers::search_sermons))
}

/// Admin sermon routes; the session layer is applied by the admin router
pub fn admin_sermon_routes() -> Router {
    Router::new()
        .route(
            "/api/admin/sermons",
            get(handlers::admin_list_sermons
                .layer(middleware::from_fn_with_state(ANY_ADMIN, require_roles)))
            .post(handlers::create_sermon
                .layer(middleware::from_fn_with_state(MEDIA_EDITORS, require_roles))),
        )
        .route(
            "/api/admin/sermons/:id",
            put(handlers::update_sermon
                .layer(middleware::from_fn_with_state(MEDIA_EDITORS, require_roles)))
            .delete(handlers::delete_sermon
                .layer(middleware::from_fn_with_state(SUPERADMIN_ONLY, require_roles))),
        )
}
