#[cfg(test)]
mod tests {
    use crate::common::seed::DEFAULT_SERVICE_TYPES;
    use crate::test_support::TestApp;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_service_types_are_listed_by_name() {
        let app = TestApp::new().await;

        let response = app.get("/api/service-types", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["success"], true);

        let names: Vec<&str> = response.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), DEFAULT_SERVICE_TYPES.len());

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
