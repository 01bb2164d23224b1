//! Tests for auth module
//!
//! These tests drive the full router with a stub identity provider and verify:
//! - Login sets the session cookie only for known admins
//! - Session verification, revocation and the role gate fail closed
//! - The auth limiter and the audit trail behind admin mutations

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::seed::seed_admins;
    use crate::test_support::{
        activity_count, json_request, wait_for_activity, TestApp, MEDIA, SECRETARIAT, SUPERADMIN,
    };
    use axum::http::{header, Method, StatusCode};
    use serde_json::json;

    fn set_cookie(response: &crate::test_support::TestResponse) -> Option<String> {
        response
            .headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn insert_sermon(app: &TestApp) -> i64 {
        sqlx::query(
            "INSERT INTO sermons (title, pastor, service, date, youtube_id, published) VALUES ('Walking by Faith', 'Pastor A', 'Sunday Service', '2024-06-02', 'yt-1', 1)",
        )
        .execute(app.db())
        .await
        .unwrap()
        .last_insert_rowid()
    }

    #[tokio::test]
    async fn test_login_sets_http_only_cookie_for_admin() {
        let app = TestApp::new().await;

        let response = app
            .post(
                "/api/auth/login",
                None,
                json!({ "idToken": format!("valid:{}", MEDIA) }),
            )
            .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);
        assert_eq!(response.body["user"]["email"], MEDIA);
        assert_eq!(response.body["user"]["name"], "media");
        assert_eq!(response.body["user"]["role"], "media_team");

        let cookie = set_cookie(&response).unwrap();
        assert!(cookie.starts_with("rccg_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=1209600"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_login_rejects_non_admin_without_setting_cookie() {
        let app = TestApp::new().await;

        let response = app
            .post(
                "/api/auth/login",
                None,
                json!({ "idToken": "valid:visitor@example.com" }),
            )
            .await;

        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(
            response.body["error"],
            "Forbidden: Admin account not found. Contact superadmin."
        );
        assert!(set_cookie(&response).is_none());
    }

    #[tokio::test]
    async fn test_login_error_cases() {
        let app = TestApp::new().await;

        let missing = app.post("/api/auth/login", None, json!({})).await;
        assert_eq!(missing.status, StatusCode::BAD_REQUEST);
        assert_eq!(missing.body["error"], "Missing or invalid idToken");

        let invalid = app
            .post("/api/auth/login", None, json!({ "idToken": "forged" }))
            .await;
        assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            invalid.body["error"],
            "Unauthorized: Invalid or expired Firebase token"
        );

        let no_email = app
            .post("/api/auth/login", None, json!({ "idToken": "valid:" }))
            .await;
        assert_eq!(no_email.status, StatusCode::UNAUTHORIZED);
        assert_eq!(no_email.body["error"], "Unauthorized: Email not found in token");
    }

    #[tokio::test]
    async fn test_me_and_logout() {
        let app = TestApp::new().await;

        let anonymous = app.get("/api/auth/me", None).await;
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
        assert_eq!(anonymous.body["error"], "Unauthorized: No session found");

        let cookie = app.cookie_for(SECRETARIAT);
        let me = app.get("/api/auth/me", Some(&cookie)).await;
        assert_eq!(me.status, StatusCode::OK);
        assert_eq!(me.body["email"], SECRETARIAT);
        assert_eq!(me.body["role"], "secretariat");

        let logout = app
            .post("/api/auth/logout", Some(&cookie), json!({}))
            .await;
        assert_eq!(logout.status, StatusCode::OK);
        assert_eq!(logout.body["message"], "Logged out successfully");
        let cleared = set_cookie(&logout).unwrap();
        assert!(cleared.starts_with("rccg_session=;"));
        assert!(cleared.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_revoked_session_is_rejected_before_expiry() {
        let app = TestApp::new().await;
        let cookie = app.cookie_for(SUPERADMIN);

        assert_eq!(
            app.get("/api/admin/dashboard", Some(&cookie)).await.status,
            StatusCode::OK
        );

        app.identity.revoke(&format!("uid-{}", SUPERADMIN));

        let response = app.get("/api/admin/dashboard", Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.body["error"],
            "Unauthorized: Invalid or expired session"
        );
    }

    #[tokio::test]
    async fn test_auth_context_carries_the_verified_principal() {
        use axum_extra::extract::cookie::{Cookie, CookieJar};

        let app = TestApp::new().await;
        let session = app.identity.session_for(SECRETARIAT);
        let jar = CookieJar::new().add(Cookie::new(
            app.state.config.cookie.name.clone(),
            session,
        ));

        let ctx = extractors::authenticate(&app.state, &jar).await.unwrap();
        assert_eq!(ctx.admin.email, SECRETARIAT);
        assert_eq!(ctx.role, rbac::Role::Secretariat);
        assert_eq!(ctx.principal.subject_id, format!("uid-{}", SECRETARIAT));
        assert_eq!(ctx.principal.email.as_deref(), Some(SECRETARIAT));
    }

    #[tokio::test]
    async fn test_missing_cookie_never_reaches_admin_handlers() {
        let app = TestApp::new().await;

        let response = app.get("/api/admin/dashboard", None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["error"], "Unauthorized: No session found");
        assert_eq!(response.body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_session_for_unknown_or_misconfigured_admin_is_forbidden() {
        let app = TestApp::new().await;

        let stranger = app.cookie_for("stranger@example.com");
        let response = app.get("/api/admin/dashboard", Some(&stranger)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body["error"], "Forbidden: Admin not found");

        sqlx::query("INSERT INTO admins (email, role) VALUES ('pastor@example.com', 'pastor')")
            .execute(app.db())
            .await
            .unwrap();
        let unknown_role = app.cookie_for("pastor@example.com");
        let response = app.get("/api/admin/dashboard", Some(&unknown_role)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_sixth_login_attempt_is_rate_limited() {
        let app = TestApp::new().await;

        for _ in 0..5 {
            let response = app
                .post("/api/auth/login", None, json!({ "idToken": "forged" }))
                .await;
            assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        }

        let limited = app
            .post("/api/auth/login", None, json!({ "idToken": "forged" }))
            .await;
        assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.body["error"], "Too many requests");
        assert_eq!(limited.body["retry_after_seconds"], 900);
        assert_eq!(limited.headers[header::RETRY_AFTER], "900");

        // Another client address has its own budget
        let mut request = json_request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "idToken": "forged" })),
        );
        request
            .headers_mut()
            .insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        assert_eq!(app.send(request).await.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_forwarded_for_cannot_buy_a_fresh_budget_when_untrusted() {
        use crate::services::rate_limit::{RateLimitConfig, RatePolicy};

        let app = TestApp::with_rate_limits(RateLimitConfig {
            trust_proxy_headers: false,
            auth: RatePolicy::new(1, 900),
            ..Default::default()
        })
        .await;

        let login = |forwarded: &'static str| {
            let mut request = json_request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "idToken": "forged" })),
            );
            request
                .headers_mut()
                .insert("x-forwarded-for", forwarded.parse().unwrap());
            request
        };

        assert_eq!(
            app.send(login("203.0.113.7")).await.status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            app.send(login("203.0.113.8")).await.status,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn test_media_team_is_denied_superadmin_route() {
        let app = TestApp::new().await;
        let id = insert_sermon(&app).await;

        let response = app
            .delete(&format!("/api/admin/sermons/{}", id), Some(&app.cookie_for(MEDIA)))
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.body["error"], "Forbidden: Insufficient permissions");
    }

    #[tokio::test]
    async fn test_secretariat_denied_delete_leaves_no_trace() {
        let app = TestApp::new().await;
        let id = insert_sermon(&app).await;

        let response = app
            .delete(
                &format!("/api/admin/sermons/{}", id),
                Some(&app.cookie_for(SECRETARIAT)),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        // Handler did not run: the sermon survives and nothing was audited
        let still_there = app.get("/api/sermons", None).await;
        assert_eq!(still_there.body["count"], 1);
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert_eq!(activity_count(app.db()).await, 0);
    }

    #[tokio::test]
    async fn test_superadmin_delete_is_audited() {
        let app = TestApp::new().await;
        let id = insert_sermon(&app).await;

        let response = app
            .delete(
                &format!("/api/admin/sermons/{}", id),
                Some(&app.cookie_for(SUPERADMIN)),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["message"], "Sermon deleted permanently");

        let logs = wait_for_activity(app.db(), 1).await;
        assert_eq!(logs[0].action, "Deleted sermon");
        assert_eq!(logs[0].details, "Walking by Faith");
        assert_eq!(logs[0].admin_email, SUPERADMIN);
    }

    #[tokio::test]
    async fn test_seed_override_controls_who_can_sign_in() {
        let app = TestApp::new().await;
        seed_admins(app.db(), Some("pastor@example.org:admin"))
            .await
            .unwrap();

        let response = app
            .post(
                "/api/auth/login",
                None,
                json!({ "idToken": "valid:pastor@example.org" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["user"]["role"], "admin");
    }
}
