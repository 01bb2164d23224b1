use super::handlers;
use axum::{routing::get, Router};

pub fn service_type_routes() -> Router {
    Router::new().route("/api/service-types", get(handlers::list_service_types))
}
