use super::models::{CreatePrayerRequest, PrayerRequest, UpdatePrayerRequest};
use crate::common::{helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct PrayerRequestsService {
    db: SqlitePool,
}

impl PrayerRequestsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<PrayerRequest>, ApiError> {
        sqlx::query_as::<_, PrayerRequest>(
            "SELECT * FROM prayer_requests ORDER BY submitted_at DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get_prayer_request(&self, id: i64) -> Result<PrayerRequest, ApiError> {
        sqlx::query_as::<_, PrayerRequest>("SELECT * FROM prayer_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Prayer request not found".to_string()))
    }

    pub async fn submit(&self, request: CreatePrayerRequest) -> Result<PrayerRequest, ApiError> {
        let id = sqlx::query("INSERT INTO prayer_requests (name, email, request) VALUES (?, ?, ?)")
            .bind(request.name.trim())
            .bind(request.email.trim())
            .bind(request.request.trim())
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .last_insert_rowid();

        info!(prayer_request_id = id, "Prayer request submitted");

        self.get_prayer_request(id).await
    }

    pub async fn update_prayer_request(
        &self,
        id: i64,
        request: UpdatePrayerRequest,
    ) -> Result<PrayerRequest, ApiError> {
        let mut prayer_request = self.get_prayer_request(id).await?;
        prayer_request.apply(request);

        sqlx::query(
            "UPDATE prayer_requests SET name = ?, email = ?, request = ?, status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&prayer_request.name)
        .bind(&prayer_request.email)
        .bind(&prayer_request.request)
        .bind(&prayer_request.status)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(prayer_request_id = id, status = %prayer_request.status, "Prayer request updated");

        self.get_prayer_request(id).await
    }

    pub async fn delete_prayer_request(&self, id: i64) -> Result<PrayerRequest, ApiError> {
        let prayer_request = self.get_prayer_request(id).await?;

        sqlx::query("DELETE FROM prayer_requests WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(prayer_request_id = id, "Prayer request deleted");

        Ok(prayer_request)
    }
}
