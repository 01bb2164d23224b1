// src/admin/handlers/dashboard.rs

use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::admin::models::DashboardStats;
use crate::admin::services::DashboardService;
use crate::auth::AuthContext;
use crate::common::{helpers::today, safe_email_log, ApiError, AppState, DataResponse};

/// GET /api/admin/dashboard - Counters and trends for the staff overview
pub async fn get_dashboard(
    Extension(state): Extension<Arc<AppState>>,
    ctx: AuthContext,
) -> Result<Json<DataResponse<DashboardStats>>, ApiError> {
    let stats = DashboardService::new(state.db.clone())
        .stats(today())
        .await?;

    info!(
        admin = %safe_email_log(&ctx.admin.email),
        total_sermons = stats.total_sermons,
        pending_testimonies = stats.pending_testimonies,
        "Dashboard stats fetched"
    );

    Ok(Json(DataResponse::new(stats)))
}
