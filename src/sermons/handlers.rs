use super::models::{
    CreateSermonRequest, SearchQuery, SermonListResponse, SermonMutationResponse,
    SermonSearchResponse, UpdateSermonRequest,
};
use super::services::SermonsService;
use crate::auth::AuthContext;
use crate::common::{ApiError, AppState, MessageResponse, Validator};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

// ============================================================================
// Public Handlers
// ============================================================================

/// GET /api/sermons - Published sermons
pub async fn list_sermons(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let sermons = SermonsService::new(state.db.clone()).list_published().await?;

    Ok(Json(SermonListResponse {
        count: sermons.len(),
        data: sermons,
    }))
}

/// GET /api/sermons/latest - Most recent published sermon
pub async fn latest_sermon(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let sermon = SermonsService::new(state.db.clone()).latest_published().await?;
    Ok(Json(sermon))
}

/// GET /api/sermons/search?q= - Search published sermons
pub async fn search_sermons(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let term = query.q.unwrap_or_default().trim().to_string();
    if term.is_empty() {
        return Err(ApiError::BadRequest("Search query 'q' is required".to_string()));
    }

    let sermons = SermonsService::new(state.db.clone())
        .search_published(&term)
        .await?;

    Ok(Json(SermonSearchResponse {
        query: term,
        count: sermons.len(),
        data: sermons,
    }))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// GET /api/admin/sermons - All sermons including drafts
pub async fn admin_list_sermons(
    Extension(state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let sermons = SermonsService::new(state.db.clone()).list_all().await?;

    Ok(Json(SermonListResponse {
        count: sermons.len(),
        data: sermons,
    }))
}

/// POST /api/admin/sermons - Create a sermon
pub async fn create_sermon(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    payload: Result<Json<CreateSermonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let sermon = SermonsService::new(state.db.clone())
        .create_sermon(request)
        .await?;

    state.audit.record(&ctx.admin, "Created sermon", sermon.title.clone());

    Ok((
        StatusCode::CREATED,
        Json(SermonMutationResponse {
            message: "Sermon created successfully".to_string(),
            sermon,
        }),
    ))
}

/// PUT /api/admin/sermons/:id - Partially update a sermon
pub async fn update_sermon(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateSermonRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    request.validate(&request).into_result()?;

    let sermon = SermonsService::new(state.db.clone())
        .update_sermon(id, request)
        .await?;

    state.audit.record(&ctx.admin, "Updated sermon", sermon.title.clone());

    Ok(Json(SermonMutationResponse {
        message: "Sermon updated".to_string(),
        sermon,
    }))
}

/// DELETE /api/admin/sermons/:id - Permanently delete a sermon
pub async fn delete_sermon(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;

    let sermon = SermonsService::new(state.db.clone()).delete_sermon(id).await?;

    state.audit.record(&ctx.admin, "Deleted sermon", sermon.title);

    Ok(Json(MessageResponse::new("Sermon deleted permanently")))
}
