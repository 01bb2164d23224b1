// Application state shared across all modules

use sqlx::SqlitePool;
use std::sync::Arc;

use super::config::AppConfig;
use crate::services::{AuditLog, IdentityProvider, RateLimiters};

/// Database pool, collaborators and configuration, read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub identity: Arc<dyn IdentityProvider>,
    pub audit: AuditLog,
    pub rate_limiters: RateLimiters,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        config: AppConfig,
        identity: Arc<dyn IdentityProvider>,
        rate_limiters: RateLimiters,
    ) -> Self {
        Self {
            audit: AuditLog::new(db.clone()),
            db,
            config: Arc::new(config),
            identity,
            rate_limiters,
        }
    }
}
