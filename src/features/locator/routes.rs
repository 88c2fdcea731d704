use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::locator::handlers;
use crate::features::locator::services::LocatorService;

pub fn routes(service: Arc<LocatorService>) -> Router {
    Router::new()
        .route("/api/locator", get(handlers::locate))
        .route("/api/locator/options", get(handlers::options))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::locator::dataset::{self, FALLBACK_WARNING};
    use crate::features::locator::feed::{stub::StubSource, HospitalFeed};
    use crate::features::locator::geolocation::GeolocationService;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;
    use std::time::Duration;

    fn server_with(source: StubSource) -> (TestServer, Arc<HospitalFeed>) {
        let feed = Arc::new(HospitalFeed::new(
            Arc::new(source),
            dataset::bundled().unwrap(),
            Duration::from_secs(30),
        ));
        let service = Arc::new(LocatorService::new(
            Arc::clone(&feed),
            GeolocationService::new(Duration::from_secs(1)),
        ));
        (TestServer::new(routes(service)).unwrap(), feed)
    }

    fn server() -> TestServer {
        server_with(StubSource::new(vec![])).0
    }

    #[tokio::test]
    async fn test_locate_without_filters_lists_baseline() {
        let response = server().get("/api/locator").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 9);
        assert_eq!(body["data"]["location_status"], "unavailable");
        assert_eq!(body["data"]["map"]["open_popup"], "RS001");
        assert!(body["data"]["hospitals"][0]["jarak"].is_null());
        assert!(body["data"]["refreshed_at"].is_null());
    }

    #[tokio::test]
    async fn test_toggle_service_selects_and_deselects() {
        let body: Value = server()
            .get("/api/locator")
            .add_query_param("toggle_service", "Poli Jiwa")
            .await
            .json();
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"]["hospitals"][0]["kode_rs"], "RS007");

        let body: Value = server()
            .get("/api/locator")
            .add_query_param("services", "Poli Jiwa")
            .add_query_param("toggle_service", "Poli Jiwa")
            .await
            .json();
        assert_eq!(body["meta"]["total"], 9);
    }

    #[tokio::test]
    async fn test_popup_parameter_opens_and_closes() {
        let body: Value = server()
            .get("/api/locator")
            .add_query_param("popup", "RS004")
            .await
            .json();
        assert_eq!(body["data"]["map"]["open_popup"], "RS004");

        let body: Value = server()
            .get("/api/locator")
            .add_query_param("popup", "")
            .await
            .json();
        assert!(body["data"]["map"]["open_popup"].is_null());
    }

    #[tokio::test]
    async fn test_locate_nearest_with_service_filter() {
        let response = server()
            .get("/api/locator")
            .add_query_param("services", "UGD 24 Jam")
            .add_query_param("max_distance", "5 km")
            .add_query_param("lat", "-7.2683")
            .add_query_param("lng", "112.7579")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let first = &body["data"]["hospitals"][0];
        assert_eq!(first["kode_rs"], "RS001");
        assert_eq!(first["jarak"], 0.0);
        assert_eq!(first["highlight"], true);
        assert_eq!(body["data"]["location_status"], "resolved");
        assert_eq!(body["data"]["map"]["center"]["lat"], -7.2683);
    }

    #[tokio::test]
    async fn test_distance_band_without_location_is_empty() {
        let response = server()
            .get("/api/locator")
            .add_query_param("max_distance", "15 km")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 0);
        assert!(body["data"]["map"]["open_popup"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_distance_band_rejected() {
        server()
            .get("/api/locator")
            .add_query_param("max_distance", "3 km")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_refresh_surfaces_warning() {
        let (server, feed) = server_with(StubSource::failing());
        feed.refresh().await;

        let body: Value = server.get("/api/locator").await.json();
        assert_eq!(body["data"]["warning"], FALLBACK_WARNING);
        assert_eq!(body["meta"]["total"], 9);
        assert!(body["data"]["refreshed_at"].is_string());
    }

    #[tokio::test]
    async fn test_options() {
        let response = server().get("/api/locator/options").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["distance_bands"][4], "Semua");
        assert_eq!(body["data"]["services"][0], "UGD 24 Jam");
    }
}
