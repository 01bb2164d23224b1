use super::models::{CreateFirstTimerRequest, FirstTimerUpdateResponse, UpdateFirstTimerRequest};
use super::services::FirstTimersService;
use crate::auth::AuthContext;
use crate::common::{ApiError, AppState, DataResponse, MessageResponse, Validator};
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

/// POST /api/first-timers - Register a first-time visitor
pub async fn register_first_timer(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateFirstTimerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    FirstTimersService::new(state.db.clone())
        .register(request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "First-timer information submitted successfully. Thank you!",
        )),
    ))
}

/// GET /api/admin/first-timers - All first-timers, latest visit first
pub async fn admin_list_first_timers(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let first_timers = FirstTimersService::new(state.db.clone()).list_all().await?;
    Ok(Json(DataResponse::new(first_timers)))
}

/// PUT /api/admin/first-timers/:id - Update follow-up status
pub async fn update_first_timer(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateFirstTimerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let first_timer = FirstTimersService::new(state.db.clone())
        .update_follow_up(id, request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Updated first-timer", first_timer.full_name());

    Ok(Json(FirstTimerUpdateResponse {
        message: "First-timer updated".to_string(),
        first_timer,
    }))
}

/// DELETE /api/admin/first-timers/:id
pub async fn delete_first_timer(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let first_timer = FirstTimersService::new(state.db.clone())
        .delete_first_timer(id)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Deleted first-timer", first_timer.full_name());

    Ok(Json(MessageResponse::new("First-timer deleted")))
}
