//! Session verification and the typed authentication context

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

use super::models::Admin;
use super::rbac::Role;
use super::resolver::resolve_admin;
use crate::common::{safe_email_log, ApiError, AppState};
use crate::services::identity::Principal;

/// Verified session, resolved admin and parsed role for the current request
///
/// Inserted into request extensions by [`require_session`] and read back by
/// handlers and the role gate. Rebuilt on every request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub admin: Admin,
    pub role: Role,
    pub principal: Principal,
}

/// Cookie → verify → email claim → admin lookup → role, failing closed at each step
pub async fn authenticate(state: &AppState, jar: &CookieJar) -> Result<AuthContext, ApiError> {
    let session = jar
        .get(&state.config.cookie.name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No session found".to_string()))?;

    let principal = state.identity.verify_session(&session).await.map_err(|e| {
        warn!(error = %e, "Session verification failed");
        ApiError::Unauthorized("Invalid or expired session".to_string())
    })?;

    let email = principal
        .email
        .clone()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| {
            warn!(subject = %principal.subject_id, "Session has no email claim");
            ApiError::Unauthorized("Email missing".to_string())
        })?;

    let admin = match resolve_admin(&state.db, &email).await {
        Ok(admin) => admin,
        Err(ApiError::NotFound(_)) => {
            warn!(email = %safe_email_log(&email), "Authenticated user is not an admin");
            return Err(ApiError::Forbidden("Admin not found".to_string()));
        }
        Err(e) => return Err(e),
    };

    let role = Role::from_str(&admin.role).map_err(|e| {
        warn!(error = %e, admin_id = admin.id, "Admin has an unrecognized role");
        ApiError::Forbidden("Admin role not recognized".to_string())
    })?;

    debug!(
        admin_id = admin.id,
        email = %safe_email_log(&admin.email),
        role = %role,
        "Session authenticated"
    );

    Ok(AuthContext {
        admin,
        role,
        principal,
    })
}

/// Middleware for every route that needs a signed-in admin
pub async fn require_session(
    Extension(state): Extension<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx = authenticate(&state, &jar).await?;
    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("No session found".to_string()))
    }
}
