//! Shared fixtures for unit and router-level tests

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

use crate::app::build_router;
use crate::auth::rbac::Role;
use crate::common::{
    config::{CookieConfig, Environment},
    migrations::run_migrations,
    seed::{seed_admins, seed_service_types},
    AppConfig, AppState,
};
use crate::services::{
    audit::ActivityLog,
    identity::{IdentityError, Principal},
    IdentityProvider, RateLimitConfig, RateLimiters,
};

pub const SUPERADMIN: &str = "admin@rccgsalvationcentre.org";
pub const MEDIA: &str = "media@rccgsalvationcentre.org";
pub const SECRETARIAT: &str = "secretariat@rccgsalvationcentre.org";
pub const WELFARE: &str = "followup@rccgsalvationcentre.org";

/// Single-connection in-memory database that lives as long as the pool
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

pub async fn migrated_pool() -> SqlitePool {
    let pool = memory_pool().await;
    run_migrations(&pool, false).await.unwrap();
    pool
}

pub async fn seeded_pool() -> SqlitePool {
    let pool = migrated_pool().await;
    seed_admins(&pool, None).await.unwrap();
    seed_service_types(&pool).await.unwrap();
    pool
}

/// Polls until at least `count` activity records exist
pub async fn wait_for_activity(pool: &SqlitePool, count: usize) -> Vec<ActivityLog> {
    for _ in 0..100 {
        let logs = sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
        .unwrap();
        if logs.len() >= count {
            return logs;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {} activity records", count);
}

pub async fn activity_count(pool: &SqlitePool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM activity_logs")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ============================================================================
// Identity stub
// ============================================================================

/// In-process identity provider
///
/// ID tokens of the form `valid:<email>` exchange for a session; `valid:`
/// yields a principal without an email claim. Anything else is rejected.
#[derive(Default)]
pub struct StubIdentity {
    sessions: Mutex<HashMap<String, Principal>>,
    revoked: Mutex<HashSet<String>>,
}

impl StubIdentity {
    fn issue(&self, email: Option<&str>) -> String {
        let mut sessions = self.sessions.lock().unwrap();
        let session = format!("session-{}", sessions.len() + 1);
        let now = chrono::Utc::now().timestamp();
        sessions.insert(
            session.clone(),
            Principal {
                subject_id: format!("uid-{}", email.unwrap_or("anonymous")),
                email: email.map(str::to_string),
                issued_at: now,
                expires_at: now + 14 * 24 * 60 * 60,
                auth_time: now,
            },
        );
        session
    }

    /// Issues a session for `email` without going through login
    pub fn session_for(&self, email: &str) -> String {
        self.issue(Some(email))
    }

    pub fn revoke(&self, subject_id: &str) {
        self.revoked.lock().unwrap().insert(subject_id.to_string());
    }
}

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn create_session(
        &self,
        id_token: &str,
        _valid_for: Duration,
    ) -> Result<String, IdentityError> {
        match id_token.strip_prefix("valid:") {
            Some("") => Ok(self.issue(None)),
            Some(email) => Ok(self.issue(Some(email))),
            None => Err(IdentityError::InvalidCredential("unknown token".to_string())),
        }
    }

    async fn verify_session(&self, session_cookie: &str) -> Result<Principal, IdentityError> {
        let principal = self
            .sessions
            .lock()
            .unwrap()
            .get(session_cookie)
            .cloned()
            .ok_or_else(|| IdentityError::InvalidCredential("unknown session".to_string()))?;
        if self.revoked.lock().unwrap().contains(&principal.subject_id) {
            return Err(IdentityError::Revoked);
        }
        Ok(principal)
    }
}

// ============================================================================
// Router harness
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig {
        environment: Environment::Development,
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        cookie: CookieConfig::for_environment(Environment::Development, None, None, None, None),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        max_body_bytes: 64 * 1024,
        request_timeout: Duration::from_secs(15),
        shutdown_grace: Duration::from_secs(1),
        reset_db: false,
        seed_data: true,
        seed_admins: None,
        sentry_dsn: None,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub identity: Arc<StubIdentity>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_rate_limits(RateLimitConfig::default()).await
    }

    pub async fn with_rate_limits(rate_limits: RateLimitConfig) -> Self {
        let pool = seeded_pool().await;
        let identity = Arc::new(StubIdentity::default());
        let state = Arc::new(AppState::new(
            pool,
            test_config(),
            identity.clone(),
            RateLimiters::new(rate_limits),
        ));

        Self {
            router: build_router(state.clone()),
            state,
            identity,
        }
    }

    pub fn db(&self) -> &SqlitePool {
        &self.state.db
    }

    pub async fn add_admin(&self, email: &str, role: Role) {
        sqlx::query("INSERT INTO admins (email, role) VALUES (?, ?)")
            .bind(email)
            .bind(role.as_str())
            .execute(self.db())
            .await
            .unwrap();
    }

    /// `Cookie` header value carrying a fresh session for `email`
    pub fn cookie_for(&self, email: &str) -> String {
        format!(
            "{}={}",
            self.state.config.cookie.name,
            self.identity.session_for(email)
        )
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(json_request(Method::GET, uri, cookie, None)).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(json_request(Method::POST, uri, cookie, Some(body)))
            .await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(json_request(Method::PUT, uri, cookie, Some(body)))
            .await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(json_request(Method::DELETE, uri, cookie, None))
            .await
    }
}

pub fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
