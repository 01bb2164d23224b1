use super::models::{Attendance, CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::common::{helpers::now_timestamp, ApiError};
use sqlx::SqlitePool;
use tracing::info;

pub struct AttendanceService {
    db: SqlitePool,
}

impl AttendanceService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list_all(&self) -> Result<Vec<Attendance>, ApiError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendance ORDER BY date DESC, id DESC")
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }

    pub async fn get_attendance(&self, id: i64) -> Result<Attendance, ApiError> {
        sqlx::query_as::<_, Attendance>("SELECT * FROM attendance WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound("Attendance record not found".to_string()))
    }

    pub async fn create_attendance(
        &self,
        request: CreateAttendanceRequest,
        recorded_by: &str,
    ) -> Result<Attendance, ApiError> {
        let total = request.total().ok_or_else(|| {
            ApiError::ValidationError("total: adults plus children is too large".to_string())
        })?;

        let id = sqlx::query(
            r#"
            INSERT INTO attendance (
                date, service_type, adults, children, total,
                first_timers, visitors, members, notes, recorded_by
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.date.trim())
        .bind(request.service_type.trim())
        .bind(request.adults)
        .bind(request.children)
        .bind(total)
        .bind(request.first_timers)
        .bind(request.visitors)
        .bind(request.members)
        .bind(&request.notes)
        .bind(recorded_by)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .last_insert_rowid();

        info!(attendance_id = id, "Attendance record created");

        self.get_attendance(id).await
    }

    pub async fn update_attendance(
        &self,
        id: i64,
        request: UpdateAttendanceRequest,
        recorded_by: &str,
    ) -> Result<Attendance, ApiError> {
        let mut attendance = self.get_attendance(id).await?;
        attendance.apply(request);

        sqlx::query(
            r#"
            UPDATE attendance
            SET service_type = ?, adults = ?, children = ?, total = ?, first_timers = ?,
                visitors = ?, members = ?, notes = ?, recorded_by = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&attendance.service_type)
        .bind(attendance.adults)
        .bind(attendance.children)
        .bind(attendance.total)
        .bind(attendance.first_timers)
        .bind(attendance.visitors)
        .bind(attendance.members)
        .bind(&attendance.notes)
        .bind(recorded_by)
        .bind(now_timestamp())
        .bind(id)
        .execute(&self.db)
        .await
        .map_err(ApiError::DatabaseError)?;

        info!(attendance_id = id, "Attendance record updated");

        self.get_attendance(id).await
    }

    pub async fn delete_attendance(&self, id: i64) -> Result<Attendance, ApiError> {
        let attendance = self.get_attendance(id).await?;

        sqlx::query("DELETE FROM attendance WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(ApiError::DatabaseError)?;

        info!(attendance_id = id, "Attendance record deleted");

        Ok(attendance)
    }
}
