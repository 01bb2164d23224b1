use super::models::{CreateFirstTimerRequest, FirstTimer, UpdateFirstTimerRequest};
use crate::common::{helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct FirstTimersService {
    db: SqlitePool,
}

impl FirstTimersService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<FirstTimer>, ApiError> {
        sqlx::query_as::<_, FirstTimer>(
            "SELECT * FROM first_timers ORDER BY visit_date DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get_first_timer(&self, id: i64) -> Result<FirstTimer, ApiError> {
        sqlx::query_as::<_, FirstTimer>("SELECT * FROM first_timers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("First-timer not found".to_string()))
    }

    pub async fn register(&self, request: CreateFirstTimerRequest) -> Result<FirstTimer, ApiError> {
        let id = sqlx::query(
            r#"
            INSERT INTO first_timers (
                first_name, last_name, email, phone, address, city, state,
                date_of_birth, gender, marital_status, occupation, visit_date,
                how_did_you_hear, prayer_request, interested_in_membership
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.first_name.trim())
        .bind(request.last_name.trim())
        .bind(request.email.trim())
        .bind(request.phone.trim())
        .bind(&request.address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(request.date_of_birth.trim())
        .bind(&request.gender)
        .bind(&request.marital_status)
        .bind(&request.occupation)
        .bind(request.visit_date.trim())
        .bind(&request.how_did_you_hear)
        .bind(&request.prayer_request)
        .bind(request.interested_in_membership)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .last_insert_rowid();

        info!(first_timer_id = id, "First-timer registered");

        self.get_first_timer(id).await
    }

    pub async fn update_follow_up(
        &self,
        id: i64,
        request: UpdateFirstTimerRequest,
    ) -> Result<FirstTimer, ApiError> {
        let mut first_timer = self.get_first_timer(id).await?;
        if let Some(follow_up_status) = request.follow_up_status {
            first_timer.follow_up_status = follow_up_status;
        }
        if let Some(status) = request.status {
            first_timer.status = status;
        }

        sqlx::query(
            "UPDATE first_timers SET follow_up_status = ?, status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&first_timer.follow_up_status)
        .bind(&first_timer.status)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(first_timer_id = id, "First-timer updated");

        self.get_first_timer(id).await
    }

    pub async fn delete_first_timer(&self, id: i64) -> Result<FirstTimer, ApiError> {
        let first_timer = self.get_first_timer(id).await?;

        sqlx::query("DELETE FROM first_timers WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(first_timer_id = id, "First-timer deleted");

        Ok(first_timer)
    }
}
