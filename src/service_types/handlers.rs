use super::models::ServiceTypeListResponse;
use super::services::ServiceTypesService;
use crate::common::{ApiError, AppState};
use axum::{extract::Extension, response::IntoResponse, Json};
use std::sync::Arc;

/// GET /api/service-types - All service types by name
pub async fn list_service_types(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let data = ServiceTypesService::new(state.db.clone()).list().await?;

    Ok(Json(ServiceTypeListResponse {
        success: true,
        data,
    }))
}
