//! Authentication handlers

use axum::extract::{rejection::JsonRejection, Extension, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use std::sync::Arc;
use tracing::{info, warn};

use super::extractors::AuthContext;
use super::models::{LoginRequest, LoginResponse, LogoutResponse, UserInfo};
use super::resolver::resolve_admin;
use crate::common::{config::CookieConfig, helpers::safe_token_log, safe_email_log, ApiError, AppState};
use crate::services::identity::SESSION_DURATION;

fn session_cookie(config: &CookieConfig, value: String, max_age: time::Duration) -> Cookie<'static> {
    let mut builder = Cookie::build((config.name.clone(), value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(max_age);
    if let Some(domain) = &config.domain {
        builder = builder.domain(domain.clone());
    }
    builder.build()
}

/// POST /api/auth/login
/// Exchanges a Firebase ID token for a session cookie
///
/// # Request Body
/// ```json
/// { "idToken": "<firebase id token>" }
/// ```
///
/// The cookie is only set once the caller is known to be an admin.
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Ok(Json(payload)) = payload else {
        return Err(ApiError::BadRequest("Missing or invalid idToken".to_string()));
    };
    if payload.id_token.trim().is_empty() {
        return Err(ApiError::BadRequest("Missing or invalid idToken".to_string()));
    }

    let session = state
        .identity
        .create_session(&payload.id_token, SESSION_DURATION)
        .await
        .map_err(|e| {
            warn!(
                error = %e,
                token = %safe_token_log(&payload.id_token),
                "Session exchange failed"
            );
            ApiError::Unauthorized("Invalid or expired Firebase token".to_string())
        })?;

    let principal = state.identity.verify_session(&session).await.map_err(|e| {
        warn!(error = %e, "Newly issued session failed verification");
        ApiError::Unauthorized("Failed to verify Firebase token".to_string())
    })?;

    let email = principal
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Email not found in token".to_string()))?;

    let admin = match resolve_admin(&state.db, &email).await {
        Ok(admin) => admin,
        Err(ApiError::NotFound(_)) => {
            warn!(email = %safe_email_log(&email), "Login attempt by non-admin");
            return Err(ApiError::Forbidden(
                "Admin account not found. Contact superadmin.".to_string(),
            ));
        }
        Err(e) => return Err(e),
    };

    let max_age = time::Duration::seconds(SESSION_DURATION.as_secs() as i64);
    let jar = jar.add(session_cookie(&state.config.cookie, session, max_age));

    info!(
        admin_id = admin.id,
        email = %safe_email_log(&admin.email),
        role = %admin.role,
        "Admin logged in"
    );

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            user: UserInfo::from(&admin),
        }),
    ))
}

/// GET /api/auth/me
pub async fn me(ctx: AuthContext) -> Json<UserInfo> {
    Json(UserInfo::from(&ctx.admin))
}

/// POST /api/auth/logout
/// Clears the session cookie. The session itself stays valid at the provider
/// until it expires or is revoked.
pub async fn logout(
    Extension(state): Extension<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = jar.add(session_cookie(
        &state.config.cookie,
        String::new(),
        time::Duration::ZERO,
    ));

    (
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out successfully".to_string(),
        }),
    )
}
