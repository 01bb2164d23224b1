use super::models::{
    CreateTestimonyRequest, ReviewDecision, ReviewTestimonyRequest, TestimonyReviewResponse,
};
use super::services::TestimoniesService;
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

/// GET /api/testimonies - Approved testimonies
pub async fn list_testimonies(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let testimonies = TestimoniesService::new(state.db.clone())
        .list_approved()
        .await?;
    Ok(Json(DataResponse::new(testimonies)))
}

/// POST /api/testimonies - Submit a testimony for review
pub async fn submit_testimony(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<CreateTestimonyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    TestimoniesService::new(state.db.clone())
        .submit(request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Testimony submitted successfully. It will be reviewed soon.",
        )),
    ))
}

/// GET /api/admin/testimonies - All testimonies, newest submission first
pub async fn admin_list_testimonies(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let testimonies = TestimoniesService::new(state.db.clone()).list_all().await?;
    Ok(Json(DataResponse::new(testimonies)))
}

/// PUT /api/admin/testimonies/:id - Approve or reject
pub async fn review_testimony(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReviewTestimonyRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let decision: ReviewDecision = request.status.parse().map_err(|_| {
        ApiError::BadRequest("Invalid status. Use 'approved' or 'rejected'".to_string())
    })?;

    let testimony = TestimoniesService::new(state.db.clone())
        .review(id, decision)
        .await?;

    state
        .audit
        .record(&ctx.admin, decision.audit_action(), testimony.title.clone());

    Ok(Json(TestimonyReviewResponse {
        message: format!("Testimony {}", decision),
        testimony,
    }))
}

/// DELETE /api/admin/testimonies/:id
pub async fn delete_testimony(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let testimony = TestimoniesService::new(state.db.clone())
        .delete_testimony(id)
        .await?;

    state.audit.record(&ctx.admin, "Deleted testimony", testimony.title);

    Ok(Json(MessageResponse::new("Testimony deleted")))
}
