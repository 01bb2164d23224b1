use super::models::{
    CreateRegularProgramRequest, CreateSpecialEventRequest, RegularProgramResponse,
    SpecialEventResponse, UpdateRegularProgramRequest, UpdateSpecialEventRequest,
};
use super::services::{RegularProgramsService, SpecialEventsService};
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

// ============================================================================
// Special Event Handlers
// ============================================================================

/// GET /api/special-events - Published events
pub async fn list_special_events(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let events = SpecialEventsService::new(state.db.clone())
        .list_published()
        .await?;
    Ok(Json(DataResponse::new(events)))
}

/// GET /api/admin/special-events - All events including unpublished
pub async fn admin_list_special_events(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let events = SpecialEventsService::new(state.db.clone()).list_all().await?;
    Ok(Json(DataResponse::new(events)))
}

/// POST /api/admin/special-events
pub async fn create_special_event(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    payload: Result<Json<CreateSpecialEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let event = SpecialEventsService::new(state.db.clone())
        .create_event(request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Created special event", event.title.clone());

    Ok((
        StatusCode::CREATED,
        Json(SpecialEventResponse {
            message: "Special event created".to_string(),
            event,
        }),
    ))
}

/// PUT /api/admin/special-events/:id
pub async fn update_special_event(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateSpecialEventRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let event = SpecialEventsService::new(state.db.clone())
        .update_event(id, request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Updated special event", event.title.clone());

    Ok(Json(SpecialEventResponse {
        message: "Special event updated".to_string(),
        event,
    }))
}

/// DELETE /api/admin/special-events/:id
pub async fn delete_special_event(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let event = SpecialEventsService::new(state.db.clone())
        .delete_event(id)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Deleted special event", event.title);

    Ok(Json(MessageResponse::new("Special event deleted")))
}

// ============================================================================
// Regular Program Handlers
// ============================================================================

/// GET /api/regular-programs - Active programs
pub async fn list_regular_programs(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = RegularProgramsService::new(state.db.clone())
        .list_active()
        .await?;
    Ok(Json(DataResponse::new(programs)))
}

/// GET /api/admin/regular-programs - All programs including inactive
pub async fn admin_list_regular_programs(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let programs = RegularProgramsService::new(state.db.clone())
        .list_all()
        .await?;
    Ok(Json(DataResponse::new(programs)))
}

/// POST /api/admin/regular-programs
pub async fn create_regular_program(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    payload: Result<Json<CreateRegularProgramRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let program = RegularProgramsService::new(state.db.clone())
        .create_program(request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Created regular program", program.title.clone());

    Ok((
        StatusCode::CREATED,
        Json(RegularProgramResponse {
            message: "Regular program created".to_string(),
            program,
        }),
    ))
}

/// PUT /api/admin/regular-programs/:id
pub async fn update_regular_program(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateRegularProgramRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let program = RegularProgramsService::new(state.db.clone())
        .update_program(id, request)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Updated regular program", program.title.clone());

    Ok(Json(RegularProgramResponse {
        message: "Regular program updated".to_string(),
        program,
    }))
}

/// DELETE /api/admin/regular-programs/:id
pub async fn delete_regular_program(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let program = RegularProgramsService::new(state.db.clone())
        .delete_program(id)
        .await?;

    state
        .audit
        .record(&ctx.admin, "Deleted regular program", program.title);

    Ok(Json(MessageResponse::new("Regular program deleted")))
}
