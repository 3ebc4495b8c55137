//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Geocoding and routing adapters against mocked services
//! - A full planning session driven through the adapters

use std::sync::Arc;

use application::{
    ApplicationError, GeocodingPort, PlannerEvent, PlanningSession, RoutePlanner, RoutingPort,
    SelectionEvent,
};
use domain::value_objects::{Coordinate, PointRole};
use integration_routing::{OpenCageConfig, OsrmConfig};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::{GeocodingAdapter, RoutingAdapter, StaticSessionAdapter};

fn geocoding_adapter(server: &MockServer) -> GeocodingAdapter {
    GeocodingAdapter::with_config(&OpenCageConfig {
        base_url: server.uri(),
        ..OpenCageConfig::for_testing()
    })
    .unwrap()
}

fn routing_adapter(server: &MockServer) -> RoutingAdapter {
    RoutingAdapter::with_config(&OsrmConfig {
        base_url: server.uri(),
        ..OsrmConfig::for_testing()
    })
    .unwrap()
}

fn park_ave() -> Coordinate {
    Coordinate::new(40.7484, -73.9857).unwrap()
}

fn fifth_ave() -> Coordinate {
    Coordinate::new(40.7794, -73.9632).unwrap()
}

fn opencage_result(formatted: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "results": [{"formatted": formatted, "geometry": {"lat": lat, "lng": lng}}],
        "total_results": 1
    })
}

// ============================================================================
// Geocoding Adapter Tests
// ============================================================================

mod geocoding_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn reverse_geocode_returns_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opencage_result(
                "Park Avenue, New York",
                40.7484,
                -73.9857,
            )))
            .mount(&server)
            .await;

        let label = geocoding_adapter(&server).reverse_geocode(park_ave()).await;
        assert_eq!(label.as_deref(), Some("Park Avenue, New York"));
    }

    #[tokio::test]
    async fn reverse_geocode_failure_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(geocoding_adapter(&server).reverse_geocode(park_ave()).await.is_none());
    }

    #[tokio::test]
    async fn reverse_geocode_without_results_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&server)
            .await;

        assert!(geocoding_adapter(&server).reverse_geocode(park_ave()).await.is_none());
    }

    #[tokio::test]
    async fn forward_geocode_returns_first_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Times Square"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opencage_result(
                "Times Square, New York",
                40.758,
                -73.9855,
            )))
            .mount(&server)
            .await;

        let found = geocoding_adapter(&server)
            .forward_geocode("Times Square")
            .await
            .unwrap();
        assert_eq!(found.label, "Times Square, New York");
        assert_eq!(found.coordinate, Coordinate::new(40.758, -73.9855).unwrap());
    }

    #[tokio::test]
    async fn forward_geocode_no_results_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})),
            )
            .mount(&server)
            .await;

        let err = geocoding_adapter(&server)
            .forward_geocode("Atlantis")
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::GeocodeNotFound("Atlantis".to_string()));
        assert_eq!(err.user_message(), "Location not found.");
    }

    #[tokio::test]
    async fn forward_geocode_server_error_is_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = geocoding_adapter(&server)
            .forward_geocode("Times Square")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::GeocodeNetwork(_)));
        assert_eq!(err.user_message(), "Geocoding failed.");
    }
}

// ============================================================================
// Routing Adapter Tests
// ============================================================================

mod routing_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn route_is_converted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/route/v1/driving/.+"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "Ok",
                "routes": [{"distance": 5000.0, "duration": 600.0}]
            })))
            .mount(&server)
            .await;

        let result = routing_adapter(&server)
            .compute_route(park_ave(), fifth_ave())
            .await
            .unwrap();
        assert_eq!(result.format_distance(), "5.00 km");
        assert_eq!(result.format_duration(), "10 min");
    }

    #[tokio::test]
    async fn no_route_is_route_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "NoRoute",
                "message": "Impossible route between points"
            })))
            .mount(&server)
            .await;

        let err = routing_adapter(&server)
            .compute_route(park_ave(), fifth_ave())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNotFound(_)));
    }

    #[tokio::test]
    async fn unavailable_service_is_route_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = routing_adapter(&server)
            .compute_route(park_ave(), fifth_ave())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RouteNetwork(_)));
    }
}

// ============================================================================
// Planning Session Tests
// ============================================================================

mod planning_session_tests {
    use super::*;

    async fn mock_services() -> (MockServer, MockServer) {
        let geocoder = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "40.7484,-73.9857"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opencage_result(
                "Park Ave",
                40.7484,
                -73.9857,
            )))
            .mount(&geocoder)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "5th Ave"))
            .respond_with(ResponseTemplate::new(200).set_body_json(opencage_result(
                "5th Ave",
                40.7794,
                -73.9632,
            )))
            .mount(&geocoder)
            .await;

        let router = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/route/v1/driving/-73.9857,40.7484;-73.9632,40.7794"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "Ok",
                "routes": [{"distance": 5000.0, "duration": 600.0}]
            })))
            .mount(&router)
            .await;

        (geocoder, router)
    }

    #[tokio::test]
    async fn click_then_search_produces_route() {
        let (geocoder, router) = mock_services().await;
        let geocoding: Arc<dyn GeocodingPort> = Arc::new(geocoding_adapter(&geocoder));
        let routing: Arc<dyn RoutingPort> = Arc::new(routing_adapter(&router));
        let mut planner = RoutePlanner::new(geocoding, routing);

        planner
            .settle(SelectionEvent::MapClicked(park_ave()).into())
            .await
            .unwrap();
        planner
            .settle(PlannerEvent::Search {
                role: PointRole::B,
                query: "5th Ave".to_string(),
            })
            .await
            .unwrap();

        let snapshot = planner.snapshot();
        let (a, b) = snapshot.selection.pair().unwrap();
        assert_eq!(a.label(), "Park Ave");
        assert_eq!(b.label(), "5th Ave");
        assert_eq!(snapshot.distance.as_deref(), Some("5.00 km"));
        assert_eq!(snapshot.duration.as_deref(), Some("10 min"));
    }

    #[tokio::test]
    async fn signed_out_session_is_refused() {
        let (geocoder, router) = mock_services().await;
        let planner = RoutePlanner::new(
            Arc::new(geocoding_adapter(&geocoder)),
            Arc::new(routing_adapter(&router)),
        );

        let result = PlanningSession::start(&StaticSessionAdapter::signed_out(), planner, 8);
        assert!(matches!(result, Err(ApplicationError::NotAuthorized(_))));
    }
}
