use super::models::{AttendanceMutationResponse, CreateAttendanceRequest, UpdateAttendanceRequest};
use super::services::AttendanceService;
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

/// GET /api/admin/attendance - All records, latest service first
pub async fn list_attendance(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let records = AttendanceService::new(state.db.clone()).list_all().await?;
    Ok(Json(DataResponse::new(records)))
}

/// POST /api/admin/attendance - Record attendance for a service
pub async fn create_attendance(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    payload: Result<Json<CreateAttendanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let attendance = AttendanceService::new(state.db.clone())
        .create_attendance(request, &ctx.admin.email)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Created attendance record", attendance.summary());

    Ok((
        StatusCode::CREATED,
        Json(AttendanceMutationResponse {
            message: "Attendance record created".to_string(),
            attendance,
        }),
    ))
}

/// PUT /api/admin/attendance/:id
pub async fn update_attendance(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateAttendanceRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let attendance = AttendanceService::new(state.db.clone())
        .update_attendance(id, request, &ctx.admin.email)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Updated attendance record", attendance.summary());

    Ok(Json(AttendanceMutationResponse {
        message: "Attendance record updated".to_string(),
        attendance,
    }))
}

/// DELETE /api/admin/attendance/:id
pub async fn delete_attendance(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let attendance = AttendanceService::new(state.db.clone())
        .delete_attendance(id)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Deleted attendance record", attendance.summary());

    Ok(Json(MessageResponse::new("Attendance record deleted")))
}
