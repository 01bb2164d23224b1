use super::models::{CreatePrayerRequest, PrayerRequest, PrayerRequestResponse, UpdatePrayerRequest};
use super::services::PrayerRequestsService;
use super::validators::is_valid_status;
use crate::auth::AuthContext;
use crate::common::{ApiError, AppState, Validator};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// POST /api/prayer-requests - Submit a prayer request
pub async fn submit_prayer_request(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreatePrayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let prayer_request = PrayerRequestsService::new(state.db.clone())
        .submit(request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PrayerRequestResponse::with_message(
            "Prayer request submitted successfully",
            Some(prayer_request),
        )),
    ))
}

/// GET /api/admin/prayer-requests - All prayer requests, newest first
pub async fn admin_list_prayer_requests(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let prayer_requests = PrayerRequestsService::new(state.db.clone())
        .list_all()
        .await?;
    Ok(Json(PrayerRequestResponse::data(prayer_requests)))
}

/// PUT /api/admin/prayer-requests/:id
pub async fn update_prayer_request(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePrayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    if let Some(status) = &request.status {
        if !is_valid_status(status) {
            return Err(ApiError::BadRequest("Invalid status".to_string()));
        }
    }
    request.validate(&request).into_result()?;

    let prayer_request = PrayerRequestsService::new(state.db.clone())
        .update_prayer_request(id, request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Updated prayer request", prayer_request.name.clone());

    Ok(Json(PrayerRequestResponse::with_message(
        "Prayer request updated",
        Some(prayer_request),
    )))
}

/// DELETE /api/admin/prayer-requests/:id
pub async fn delete_prayer_request(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let prayer_request = PrayerRequestsService::new(state.db.clone())
        .delete_prayer_request(id)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Deleted prayer request", prayer_request.name);

    Ok(Json(PrayerRequestResponse::<PrayerRequest>::with_message(
        "Prayer request deleted",
        None,
    )))
}
