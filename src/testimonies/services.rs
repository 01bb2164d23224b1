use super::models::{CreateTestimonyRequest, ReviewDecision, Testimony};
use crate::common::{helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct TestimoniesService {
    db: SqlitePool,
}

impl TestimoniesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Approved testimonies, latest approval first
    pub async fn list_approved(&self) -> Result<Vec<Testimony>, ApiError> {
        sqlx::query_as::<_, Testimony>(
            r#"
            SELECT * FROM testimonies
            WHERE status = 'approved'
            ORDER BY COALESCE(approved_at, submitted_at) DESC, id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn list_all(&self) -> Result<Vec<Testimony>, ApiError> {
        sqlx::query_as::<_, Testimony>(
            "SELECT * FROM testimonies ORDER BY submitted_at DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get_testimony(&self, id: i64) -> Result<Testimony, ApiError> {
        sqlx::query_as::<_, Testimony>("SELECT * FROM testimonies WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Testimony not found".to_string()))
    }

    /// Stores a new submission as pending
    pub async fn submit(&self, request: CreateTestimonyRequest) -> Result<Testimony, ApiError> {
        let id = sqlx::query(
            "INSERT INTO testimonies (name, title, message, email, phone) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(request.name.trim())
        .bind(request.title.trim())
        .bind(request.message.trim())
        .bind(request.email.trim())
        .bind(request.phone.trim())
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .last_insert_rowid();

        info!(testimony_id = id, "Testimony submitted");

        self.get_testimony(id).await
    }

    /// Sets the decision timestamp and clears the opposite one
    pub async fn review(&self, id: i64, decision: ReviewDecision) -> Result<Testimony, ApiError> {
        self.get_testimony(id).await?;

        let now = now_timestamp();
        let (approved_at, rejected_at) = match decision {
            ReviewDecision::Approved => (Some(now), None),
            ReviewDecision::Rejected => (None, Some(now)),
        };

        sqlx::query(
            "UPDATE testimonies SET status = ?, approved_at = ?, rejected_at = ? WHERE id = ?",
        )
        .bind(decision.as_str())
        .bind(approved_at)
        .bind(rejected_at)
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(testimony_id = id, status = %decision, "Testimony reviewed");

        self.get_testimony(id).await
    }

    pub async fn delete_testimony(&self, id: i64) -> Result<Testimony, ApiError> {
        let testimony = self.get_testimony(id).await?;

        sqlx::query("DELETE FROM testimonies WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(testimony_id = id, "Testimony deleted");

        Ok(testimony)
    }
}
