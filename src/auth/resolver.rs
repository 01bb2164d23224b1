//! Maps a verified identity to an internal admin account

use sqlx::SqlitePool;
use tracing::{debug, error};

use super::models::Admin;
use crate::common::{safe_email_log, ApiError};

/// Exact-match lookup by email. Never creates an admin.
pub async fn resolve_admin(db: &SqlitePool, email: &str) -> Result<Admin, ApiError> {
    let admin = sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE email = ?")
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                email = %safe_email_log(email),
                "Database error during admin lookup"
            );
            ApiError::DatabaseError(e)
        })?;

    match admin {
        Some(admin) => {
            debug!(admin_id = admin.id, role = %admin.role, "Admin resolved");
            Ok(admin)
        }
        None => Err(ApiError::NotFound("Admin not found".to_string())),
    }
}
