// src/services/audit.rs
//! Best-effort activity trail for admin mutations
//!
//! Each record is written by a detached task. The handler never waits for it
//! and a failed insert is only logged, so under heavy load records can be lost.

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use crate::auth::models::Admin;
use crate::common::safe_email_log;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: i64,
    pub admin_id: i64,
    pub admin_email: String,
    pub action: String,
    pub details: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct AuditLog {
    db: SqlitePool,
}

impl AuditLog {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub fn record(&self, admin: &Admin, action: &str, details: impl Into<String>) {
        let db = self.db.clone();
        let admin_id = admin.id;
        let admin_email = admin.email.clone();
        let action = action.to_string();
        let details = details.into();

        tokio::spawn(async move {
            let result = sqlx::query(
                "INSERT INTO activity_logs (admin_id, admin_email, action, details) VALUES (?, ?, ?, ?)",
            )
            .bind(admin_id)
            .bind(&admin_email)
            .bind(&action)
            .bind(&details)
            .execute(&db)
            .await;

            match result {
                Ok(_) => debug!(admin_id = admin_id, action = %action, "Activity recorded"),
                Err(e) => warn!(
                    error = %e,
                    admin = %safe_email_log(&admin_email),
                    action = %action,
                    "Failed to record activity"
                ),
            }
        });
    }

    /// Most recent records first
    pub async fn recent(&self, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs ORDER BY created_at DESC, id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::resolver::resolve_admin;
    use crate::test_support::{seeded_pool, wait_for_activity};

    #[tokio::test]
    async fn test_record_is_written_asynchronously() {
        let pool = seeded_pool().await;
        let admin = resolve_admin(&pool, "admin@rccgsalvationcentre.org")
            .await
            .unwrap();
        let audit = AuditLog::new(pool.clone());

        audit.record(&admin, "Deleted sermon", "Walking by Faith");

        let logs = wait_for_activity(&pool, 1).await;
        assert_eq!(logs[0].action, "Deleted sermon");
        assert_eq!(logs[0].details, "Walking by Faith");
        assert_eq!(logs[0].admin_email, admin.email);
        assert_eq!(logs[0].admin_id, admin.id);
    }

    #[tokio::test]
    async fn test_failed_insert_is_swallowed() {
        let pool = seeded_pool().await;
        let admin = resolve_admin(&pool, "admin@rccgsalvationcentre.org")
            .await
            .unwrap();
        sqlx::query("DROP TABLE activity_logs")
            .execute(&pool)
            .await
            .unwrap();

        // Must not panic or surface an error to the caller
        AuditLog::new(pool.clone()).record(&admin, "Deleted sermon", "x");
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
