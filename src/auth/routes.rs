//! Authentication routes

use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};

use super::{extractors::require_session, handlers};

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /api/auth/login` - Exchange a Firebase ID token for a session cookie
/// - `GET /api/auth/me` - Current admin (session required)
/// - `POST /api/auth/logout` - Clear the session cookie
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route(
            "/api/auth/me",
            get(handlers::me.layer(middleware::from_fn(require_session))),
        )
        .route("/api/auth/logout", post(handlers::logout))
}
