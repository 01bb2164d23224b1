//! Tests for testimonies module
//!
//! These tests verify:
//! - Submission validation and the pending default
//! - Review transitions and their timestamps
//! - Public visibility of approved testimonies only
//! - The submission rate limit

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use crate::services::rate_limit::{RateLimitConfig, RatePolicy};
    use crate::test_support::{seeded_pool, wait_for_activity, TestApp, SECRETARIAT};
    use axum::http::StatusCode;
    use models::ReviewDecision;
    use serde_json::json;

    fn submission(title: &str) -> models::CreateTestimonyRequest {
        models::CreateTestimonyRequest {
            name: "Grace Okafor".to_string(),
            title: title.to_string(),
            message: "God healed my mother".to_string(),
            email: "grace@example.com".to_string(),
            phone: String::new(),
        }
    }

    #[test]
    fn test_submission_validation() {
        let valid = submission("Healing");
        assert!(valid.validate(&valid).is_valid);

        let mut invalid = submission("");
        invalid.email = "grace-at-example".to_string();
        let result = invalid.validate(&invalid);
        assert_eq!(result.errors.len(), 2);
    }

    #[test]
    fn test_review_decision_parses_only_terminal_states() {
        assert_eq!("approved".parse::<ReviewDecision>(), Ok(ReviewDecision::Approved));
        assert_eq!("rejected".parse::<ReviewDecision>(), Ok(ReviewDecision::Rejected));
        assert!("pending".parse::<ReviewDecision>().is_err());
        assert!("Approved".parse::<ReviewDecision>().is_err());
    }

    #[tokio::test]
    async fn test_review_sets_and_clears_decision_timestamps() {
        let pool = seeded_pool().await;
        let service = services::TestimoniesService::new(pool);

        let testimony = service.submit(submission("Healing")).await.unwrap();
        assert_eq!(testimony.status, "pending");
        assert!(service.list_approved().await.unwrap().is_empty());

        let approved = service
            .review(testimony.id, ReviewDecision::Approved)
            .await
            .unwrap();
        assert_eq!(approved.status, "approved");
        assert!(approved.approved_at.is_some());
        assert!(approved.rejected_at.is_none());
        assert_eq!(service.list_approved().await.unwrap().len(), 1);

        let rejected = service
            .review(testimony.id, ReviewDecision::Rejected)
            .await
            .unwrap();
        assert_eq!(rejected.status, "rejected");
        assert!(rejected.approved_at.is_none());
        assert!(rejected.rejected_at.is_some());
        assert!(service.list_approved().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_secretariat_reviews_through_router() {
        let app = TestApp::new().await;
        let cookie = app.cookie_for(SECRETARIAT);

        let submitted = app
            .post(
                "/api/testimonies",
                None,
                json!({ "name": "Grace", "title": "Healing", "message": "Praise God" }),
            )
            .await;
        assert_eq!(submitted.status, StatusCode::CREATED);
        assert_eq!(
            submitted.body["message"],
            "Testimony submitted successfully. It will be reviewed soon."
        );

        let listed = app.get("/api/admin/testimonies", Some(&cookie)).await;
        let id = listed.body["data"][0]["id"].as_i64().unwrap();

        let invalid = app
            .put(
                &format!("/api/admin/testimonies/{}", id),
                Some(&cookie),
                json!({ "status": "pending" }),
            )
            .await;
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            invalid.body["error"],
            "Invalid status. Use 'approved' or 'rejected'"
        );

        let approved = app
            .put(
                &format!("/api/admin/testimonies/{}", id),
                Some(&cookie),
                json!({ "status": "approved" }),
            )
            .await;
        assert_eq!(approved.status, StatusCode::OK);
        assert_eq!(approved.body["message"], "Testimony approved");
        assert_eq!(approved.body["testimony"]["status"], "approved");

        let public = app.get("/api/testimonies", None).await;
        assert_eq!(public.body["data"].as_array().unwrap().len(), 1);

        let logs = wait_for_activity(app.db(), 1).await;
        assert_eq!(logs[0].action, "Approved testimony");
        assert_eq!(logs[0].details, "Healing");
    }

    #[tokio::test]
    async fn test_submissions_are_rate_limited() {
        let app = TestApp::with_rate_limits(RateLimitConfig {
            testimonies: RatePolicy::new(2, 3600),
            ..Default::default()
        })
        .await;
        let body = json!({ "name": "Grace", "title": "Healing", "message": "Praise God" });

        for _ in 0..2 {
            let response = app.post("/api/testimonies", None, body.clone()).await;
            assert_eq!(response.status, StatusCode::CREATED);
        }

        let limited = app.post("/api/testimonies", None, body).await;
        assert_eq!(limited.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(limited.body["retry_after_seconds"], 3600);

        // Reads are not counted against the submission limiter
        let listed = app.get("/api/testimonies", None).await;
        assert_eq!(listed.status, StatusCode::OK);
    }
}
