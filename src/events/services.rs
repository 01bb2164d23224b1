use super::models::{
    CreateRegularProgramRequest, CreateSpecialEventRequest, RegularProgram, SpecialEvent,
    UpdateRegularProgramRequest, UpdateSpecialEventRequest,
};
use crate::common::{helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct SpecialEventsService {
    db: SqlitePool,
}

impl SpecialEventsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_published(&self) -> Result<Vec<SpecialEvent>, ApiError> {
        sqlx::query_as::<_, SpecialEvent>(
            "SELECT * FROM special_events WHERE published = 1 ORDER BY date DESC, start_time DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn list_all(&self) -> Result<Vec<SpecialEvent>, ApiError> {
        sqlx::query_as::<_, SpecialEvent>(
            "SELECT * FROM special_events ORDER BY date DESC, start_time DESC, id DESC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn get_event(&self, id: i64) -> Result<SpecialEvent, ApiError> {
        sqlx::query_as::<_, SpecialEvent>("SELECT * FROM special_events WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
    }

    pub async fn create_event(
        &self,
        request: CreateSpecialEventRequest,
    ) -> Result<SpecialEvent, ApiError> {
        let id = sqlx::query(
            r#"
            INSERT INTO special_events (title, type, description, date, start_time, end_time, location, published)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.title.trim())
        .bind(request.event_type.trim())
        .bind(&request.description)
        .bind(request.date.trim())
        .bind(&request.start_time)
        .bind(&request.end_time)
        .bind(&request.location)
        .bind(request.published)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .last_insert_rowid();

        info!(event_id = id, "Special event created");

        self.get_event(id).await
    }

    pub async fn update_event(
        &self,
        id: i64,
        request: UpdateSpecialEventRequest,
    ) -> Result<SpecialEvent, ApiError> {
        let mut event = self.get_event(id).await?;
        event.apply(request);

        sqlx::query(
            r#"
            UPDATE special_events
            SET title = ?, type = ?, description = ?, date = ?, start_time = ?,
                end_time = ?, location = ?, published = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.event_type)
        .bind(&event.description)
        .bind(&event.date)
        .bind(&event.start_time)
        .bind(&event.end_time)
        .bind(&event.location)
        .bind(event.published)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(event_id = id, "Special event updated");

        self.get_event(id).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<SpecialEvent, ApiError> {
        let event = self.get_event(id).await?;

        sqlx::query("DELETE FROM special_events WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(event_id = id, "Special event deleted");

        Ok(event)
    }
}

pub struct RegularProgramsService {
    db: SqlitePool,
}

impl RegularProgramsService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_active(&self) -> Result<Vec<RegularProgram>, ApiError> {
        sqlx::query_as::<_, RegularProgram>(
            "SELECT * FROM regular_programs WHERE active = 1 ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await
        .map_err(ApiError::DatabaseError)
    }

    pub async fn list_all(&self) -> Result<Vec<RegularProgram>, ApiError> {
        sqlx::query_as::<_, RegularProgram>("SELECT * FROM regular_programs ORDER BY id ASC")
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_program(&self, id: i64) -> Result<RegularProgram, ApiError> {
        sqlx::query_as::<_, RegularProgram>("SELECT * FROM regular_programs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Program not found".to_string()))
    }

    pub async fn create_program(
        &self,
        request: CreateRegularProgramRequest,
    ) -> Result<RegularProgram, ApiError> {
        let id = sqlx::query(
            r#"
            INSERT INTO regular_programs (title, description, day, frequency, time, location, type, active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.day.trim())
        .bind(request.frequency.trim())
        .bind(&request.time)
        .bind(&request.location)
        .bind(request.program_type.trim())
        .bind(request.active.unwrap_or(true))
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .last_insert_rowid();

        info!(program_id = id, "Regular program created");

        self.get_program(id).await
    }

    pub async fn update_program(
        &self,
        id: i64,
        request: UpdateRegularProgramRequest,
    ) -> Result<RegularProgram, ApiError> {
        let mut program = self.get_program(id).await?;
        program.apply(request);

        sqlx::query(
            r#"
            UPDATE regular_programs
            SET title = ?, description = ?, day = ?, frequency = ?, time = ?,
                location = ?, type = ?, active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&program.title)
        .bind(&program.description)
        .bind(&program.day)
        .bind(&program.frequency)
        .bind(&program.time)
        .bind(&program.location)
        .bind(&program.program_type)
        .bind(program.active)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(program_id = id, "Regular program updated");

        self.get_program(id).await
    }

    pub async fn delete_program(&self, id: i64) -> Result<RegularProgram, ApiError> {
        let program = self.get_program(id).await?;

        sqlx::query("DELETE FROM regular_programs WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(program_id = id, "Regular program deleted");

        Ok(program)
    }
}
