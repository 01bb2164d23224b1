//! Tests for attendance module

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::common::Validator;
    use crate::test_support::{wait_for_activity, TestApp, SECRETARIAT, SUPERADMIN};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn test_total_defaults_to_adults_plus_children() {
        let request = models::CreateAttendanceRequest {
            date: "2024-06-02".to_string(),
            service_type: "Sunday Service".to_string(),
            adults: 120,
            children: 45,
            ..Default::default()
        };
        assert_eq!(request.total(), Some(165));
        assert!(request.validate(&request).is_valid);

        let explicit = models::CreateAttendanceRequest {
            total: Some(200),
            ..request
        };
        assert_eq!(explicit.total(), Some(200));
    }

    #[test]
    fn test_negative_counts_are_rejected() {
        let request = models::CreateAttendanceRequest {
            date: "2024-06-02".to_string(),
            service_type: "Sunday Service".to_string(),
            visitors: -1,
            ..Default::default()
        };
        let result = request.validate(&request);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "visitors");
    }

    #[test]
    fn test_overflowing_default_total_is_a_validation_error() {
        let request = models::CreateAttendanceRequest {
            date: "2024-06-02".to_string(),
            service_type: "Sunday Service".to_string(),
            adults: i64::MAX,
            children: 1,
            ..Default::default()
        };
        assert_eq!(request.total(), None);

        let result = request.validate(&request);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "total");
    }

    #[tokio::test]
    async fn test_overflowing_counts_are_rejected_through_router() {
        let app = TestApp::new().await;

        let response = app
            .post(
                "/api/admin/attendance",
                Some(&app.cookie_for(SECRETARIAT)),
                json!({
                    "date": "2024-06-02",
                    "serviceType": "Sunday Service",
                    "adults": i64::MAX,
                    "children": 1
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body["error"],
            "total: adults plus children is too large"
        );

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM attendance")
            .fetch_one(app.db())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_recorded_by_follows_the_last_writer() {
        let app = TestApp::new().await;
        let secretariat = app.cookie_for(SECRETARIAT);
        let superadmin = app.cookie_for(SUPERADMIN);

        let created = app
            .post(
                "/api/admin/attendance",
                Some(&secretariat),
                json!({
                    "date": "2024-06-02",
                    "serviceType": "Sunday Service",
                    "adults": 120,
                    "children": 45
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["attendance"]["total"], 165);
        assert_eq!(created.body["attendance"]["recordedBy"], SECRETARIAT);
        let id = created.body["attendance"]["id"].as_i64().unwrap();

        let updated = app
            .put(
                &format!("/api/admin/attendance/{}", id),
                Some(&superadmin),
                json!({ "visitors": 12 }),
            )
            .await;
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body["attendance"]["visitors"], 12);
        assert_eq!(updated.body["attendance"]["adults"], 120);
        assert_eq!(updated.body["attendance"]["recordedBy"], SUPERADMIN);

        let logs = wait_for_activity(app.db(), 2).await;
        assert_eq!(logs[0].action, "Created attendance record");
        assert_eq!(logs[0].details, "Sunday Service on 2024-06-02");
    }

    #[tokio::test]
    async fn test_secretariat_cannot_delete_attendance() {
        let app = TestApp::new().await;
        let cookie = app.cookie_for(SECRETARIAT);

        let response = app.delete("/api/admin/attendance/1", Some(&cookie)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
}
