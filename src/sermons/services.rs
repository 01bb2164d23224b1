use super::models::{CreateSermonRequest, Sermon, UpdateSermonRequest};
use crate::common::{error::map_unique_violation, helpers::like_pattern, helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

const SEARCH_LIMIT: i64 = 20;

pub struct SermonsService {
    db: SqlitePool,
}

impl SermonsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Published sermons, most recent service date first
    pub async fn list_published(&self) -> Result<Vec<Sermon>, ApiError> {
        sqlx::query_as::<_, Sermon>(
            "SELECT * FROM sermons WHERE published = 1 ORDER BY date DESC, created_at DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Most recently added published sermon
    pub async fn latest_published(&self) -> Result<Sermon, ApiError> {
        sqlx::query_as::<_, Sermon>(
            "SELECT * FROM sermons WHERE published = 1 ORDER BY created_at DESC, id DESC LIMIT 1",
        )
        .fetch_optional(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("No published sermon found".to_string()))
    }

    /// Case-insensitive substring match on title, pastor and description
    pub async fn search_published(&self, term: &str) -> Result<Vec<Sermon>, ApiError> {
        let pattern = like_pattern(term);

        sqlx::query_as::<_, Sermon>(
            r#"
            SELECT * FROM sermons
            WHERE published = 1
              AND (LOWER(title) LIKE ? ESCAPE '\'
                OR LOWER(pastor) LIKE ? ESCAPE '\'
                OR LOWER(description) LIKE ? ESCAPE '\')
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn list_all(&self) -> Result<Vec<Sermon>, ApiError> {
        sqlx::query_as::<_, Sermon>("SELECT * FROM sermons ORDER BY date DESC, id DESC")
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_sermon(&self, id: i64) -> Result<Sermon, ApiError> {
        sqlx::query_as::<_, Sermon>("SELECT * FROM sermons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Sermon not found".to_string()))
    }

    pub async fn create_sermon(&self, request: CreateSermonRequest) -> Result<Sermon, ApiError> {
        let id = sqlx::query(
            r#"
            INSERT INTO sermons (title, pastor, service, date, youtube_id, duration, description, published)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.title.trim())
        .bind(request.pastor.trim())
        .bind(request.service.trim())
        .bind(request.date.trim())
        .bind(request.youtube_id.trim())
        .bind(&request.duration)
        .bind(&request.description)
        .bind(request.published)
        .execute(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "Sermon with this YouTube video already exists"))?
        .last_insert_rowid();

        info!(sermon_id = id, "Sermon created");

        self.get_sermon(id).await
    }

    pub async fn update_sermon(
        &self,
        id: i64,
        request: UpdateSermonRequest,
    ) -> Result<Sermon, ApiError> {
        let mut sermon = self.get_sermon(id).await?;
        sermon.apply(request);

        sqlx::query(
            r#"
            UPDATE sermons
            SET title = ?, pastor = ?, service = ?, date = ?, youtube_id = ?,
                duration = ?, description = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&sermon.title)
        .bind(&sermon.pastor)
        .bind(&sermon.service)
        .bind(&sermon.date)
        .bind(&sermon.youtube_id)
        .bind(&sermon.duration)
        .bind(&sermon.description)
        .bind(sermon.published)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(|e| map_unique_violation(e, "Another sermon uses this YouTube video"))?;

        info!(sermon_id = id, "Sermon updated");

        self.get_sermon(id).await
    }

    /// Permanently removes the sermon, returning what was deleted
    pub async fn delete_sermon(&self, id: i64) -> Result<Sermon, ApiError> {
        let sermon = self.get_sermon(id).await?;

        sqlx::query("DELETE FROM sermons WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(sermon_id = id, "Sermon deleted");

        Ok(sermon)
    }
}
