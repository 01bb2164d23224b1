//! Tests for events module
//!
//! These tests verify:
//! - Publication and activity filters on the public listings
//! - The `type` field mapping on the wire
//! - That only superadmins and admins manage the calendar

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::auth::rbac::Role;
    use crate::common::Validator;
    use crate::test_support::{seeded_pool, wait_for_activity, TestApp, MEDIA};
    use axum::http::StatusCode;
    use serde_json::json;

    const EVENTS_ADMIN: &str = "events@rccgsalvationcentre.org";

    #[test]
    fn test_special_event_validation() {
        let request = models::CreateSpecialEventRequest {
            title: "Harvest Thanksgiving".to_string(),
            event_type: "thanksgiving".to_string(),
            date: "2024-11-17".to_string(),
            ..Default::default()
        };
        assert!(request.validate(&request).is_valid);

        let missing = models::CreateSpecialEventRequest::default();
        assert_eq!(missing.validate(&missing).errors.len(), 3);
    }

    #[tokio::test]
    async fn test_update_trims_date_so_upcoming_filter_sees_it() {
        let pool = seeded_pool().await;
        let events = services::SpecialEventsService::new(pool.clone());

        let event = events
            .create_event(models::CreateSpecialEventRequest {
                title: "Harvest Thanksgiving".to_string(),
                event_type: "thanksgiving".to_string(),
                date: "2024-01-07".to_string(),
                published: true,
                ..Default::default()
            })
            .await
            .unwrap();

        let updated = events
            .update_event(
                event.id,
                models::UpdateSpecialEventRequest {
                    date: Some(" 2024-11-17".to_string()),
                    title: Some("Harvest Thanksgiving 2024 ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.date, "2024-11-17");
        assert_eq!(updated.title, "Harvest Thanksgiving 2024");

        let today = chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let stats = crate::admin::services::DashboardService::new(pool)
            .stats(today)
            .await
            .unwrap();
        assert_eq!(stats.upcoming_events.len(), 1);
        assert_eq!(stats.upcoming_events[0].date, "2024-11-17");
    }

    #[tokio::test]
    async fn test_public_listings_filter_unpublished_and_inactive() {
        let pool = seeded_pool().await;
        let events = services::SpecialEventsService::new(pool.clone());
        let programs = services::RegularProgramsService::new(pool);

        events
            .create_event(models::CreateSpecialEventRequest {
                title: "Youth Convention".to_string(),
                event_type: "convention".to_string(),
                date: "2024-08-10".to_string(),
                published: true,
                ..Default::default()
            })
            .await
            .unwrap();
        events
            .create_event(models::CreateSpecialEventRequest {
                title: "Draft Retreat".to_string(),
                event_type: "retreat".to_string(),
                date: "2024-09-01".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(events.list_published().await.unwrap().len(), 1);
        assert_eq!(events.list_all().await.unwrap().len(), 2);

        let weekly = programs
            .create_program(models::CreateRegularProgramRequest {
                title: "Bible Study".to_string(),
                day: "Wednesday".to_string(),
                frequency: "weekly".to_string(),
                program_type: "study".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(weekly.active);

        programs
            .update_program(
                weekly.id,
                models::UpdateRegularProgramRequest {
                    active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(programs.list_active().await.unwrap().is_empty());
        assert_eq!(programs.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_role_manages_special_events() {
        let app = TestApp::new().await;
        app.add_admin(EVENTS_ADMIN, Role::Admin).await;
        let cookie = app.cookie_for(EVENTS_ADMIN);

        let created = app
            .post(
                "/api/admin/special-events",
                Some(&cookie),
                json!({
                    "title": "Harvest Thanksgiving",
                    "type": "thanksgiving",
                    "date": "2024-11-17",
                    "startTime": "10:00",
                    "published": true
                }),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["message"], "Special event created");
        assert_eq!(created.body["event"]["type"], "thanksgiving");
        assert_eq!(created.body["event"]["startTime"], "10:00");
        let id = created.body["event"]["id"].as_i64().unwrap();

        let public = app.get("/api/special-events", None).await;
        assert_eq!(public.body["data"][0]["title"], "Harvest Thanksgiving");

        let deleted = app
            .delete(&format!("/api/admin/special-events/{}", id), Some(&cookie))
            .await;
        assert_eq!(deleted.status, StatusCode::OK);
        assert_eq!(deleted.body["message"], "Special event deleted");

        let logs = wait_for_activity(app.db(), 2).await;
        assert_eq!(logs[0].action, "Created special event");
        assert_eq!(logs[1].action, "Deleted special event");
        assert_eq!(logs[1].admin_email, EVENTS_ADMIN);
    }

    #[tokio::test]
    async fn test_media_team_cannot_create_programs() {
        let app = TestApp::new().await;
        let cookie = app.cookie_for(MEDIA);

        let response = app
            .post(
                "/api/admin/regular-programs",
                Some(&cookie),
                json!({ "title": "Choir", "day": "Saturday", "frequency": "weekly", "type": "music" }),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);

        // Reading is open to every admin
        let listed = app.get("/api/admin/regular-programs", Some(&cookie)).await;
        assert_eq!(listed.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let app = TestApp::new().await;
        app.add_admin(EVENTS_ADMIN, Role::Admin).await;
        let cookie = app.cookie_for(EVENTS_ADMIN);

        let response = app
            .put(
                "/api/admin/regular-programs/42",
                Some(&cookie),
                json!({ "active": false }),
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.body["error"], "Program not found");
    }
}
