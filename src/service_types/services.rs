use super::models::ServiceType;
use crate::common::ApiError;
use sqlx::SqlitePool;

pub struct ServiceTypesService {
    db: SqlitePool,
}

impl ServiceTypesService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<ServiceType>, ApiError> {
        sqlx::query_as::<_, ServiceType>("SELECT * FROM service_types ORDER BY name ASC")
            .fetch_all(&self.db)
            .await
            .map_err(ApiError::DatabaseError)
    }
}
