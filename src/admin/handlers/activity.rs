// src/admin/handlers/activity.rs

use axum::extract::{rejection::QueryRejection, Extension, Query};
use axum::Json;
use std::sync::Arc;
use tracing::error;

use crate::admin::models::{ActivityQuery, ActivityResponse};
use crate::common::{ApiError, AppState};

/// GET /api/admin/activity?limit= - Most recent audit records first
pub async fn get_recent_activity(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<ActivityQuery>, QueryRejection>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let Query(query) = query?;

    let data = state
        .audit
        .recent(query.effective_limit())
        .await
        .map_err(|e| {
            error!(error = %e, "Database error fetching recent activity");
            ApiError::DatabaseError(e)
        })?;

    Ok(Json(ActivityResponse { data }))
}
