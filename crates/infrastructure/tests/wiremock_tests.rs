//! Integration tests for infrastructure crate
//!
//! Tests cover:
//! - Geocoding adapter and resolver against a mocked provider
//! - Fare prediction adapter and fare service against a mocked model
//! - Session store behind the session service

use std::sync::Arc;
use std::time::Duration;

use application::{
    ApplicationError, FareError, FarePredictionPort, FareService, GeocodingPort, LocationResolver,
    ResolveError, ResolverConfig, SessionService,
};
use domain::{FareSource, LocationSlot, PassengerCount, PickupDateTime, TripSession};
use infrastructure::{
    FarePredictionAdapter, GeocodingAdapter, MokaSessionStore, SessionStoreConfig,
};
use integration_geocoding::GeocodingConfig;
use integration_prediction::PredictionConfig;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_resolver_config() -> ResolverConfig {
    ResolverConfig {
        resolve_timeout: Duration::from_secs(2),
        suggest_timeout: Duration::from_secs(2),
        suggest_delay: Duration::ZERO,
        max_suggestions: 5,
    }
}

fn resolver_for(server: &MockServer) -> LocationResolver {
    let adapter = GeocodingAdapter::new(GeocodingConfig::for_testing(&server.uri())).unwrap();
    LocationResolver::new(Arc::new(adapter)).with_config(fast_resolver_config())
}

// ============================================================================
// Geocoding
// ============================================================================

mod geocoding_tests {
    use super::*;

    #[tokio::test]
    async fn adapter_converts_places() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "40.758", "lon": "-73.9855", "display_name": "Times Square"}
            ])))
            .mount(&server)
            .await;

        let adapter = GeocodingAdapter::new(GeocodingConfig::for_testing(&server.uri())).unwrap();
        let candidates = adapter
            .search("Times Square", Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert!((candidates[0].latitude - 40.758).abs() < 1e-9);
        assert_eq!(candidates[0].display_name.as_deref(), Some("Times Square"));
    }

    #[tokio::test]
    async fn adapter_maps_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;

        let adapter = GeocodingAdapter::new(GeocodingConfig::for_testing(&server.uri())).unwrap();
        let err = adapter
            .search("Times Square", Duration::from_millis(100))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Timeout(_)));
    }

    #[tokio::test]
    async fn adapter_maps_rejected_key_to_configuration() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let adapter = GeocodingAdapter::new(GeocodingConfig::for_testing(&server.uri())).unwrap();
        let err = adapter
            .search("Times Square", Duration::from_secs(2))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[tokio::test]
    async fn resolver_walks_ladder_until_match() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Times Square, New York, NY, USA"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("q", "Times Square, New York City"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "40.758", "lon": "-73.9855", "display_name": "Times Square, Manhattan"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let location = resolver_for(&server)
            .resolve_address("Times Square")
            .await
            .unwrap();

        assert!((location.latitude() - 40.758).abs() < 1e-9);
        assert!((location.longitude() + 73.9855).abs() < 1e-9);
    }

    #[tokio::test]
    async fn resolver_skips_out_of_area_matches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"lat": "38.9072", "lon": "-77.0369", "display_name": "Washington, DC"}
            ])))
            .expect(3)
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_address("Washington")
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::NoMatch);
    }

    #[tokio::test]
    async fn resolver_reports_unreachable_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = resolver_for(&server)
            .resolve_address("Times Square")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Unreachable(_)));
    }

    #[tokio::test]
    async fn resolver_without_key_never_calls_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let config = GeocodingConfig {
            api_key: None,
            ..GeocodingConfig::for_testing(&server.uri())
        };
        let resolver = LocationResolver::new(Arc::new(GeocodingAdapter::new(config).unwrap()))
            .with_config(fast_resolver_config());

        assert_eq!(
            resolver.resolve_address("Times Square").await.unwrap_err(),
            ResolveError::NoMatch
        );
        assert!(resolver.suggest("Times Square").await.is_empty());
    }

    #[tokio::test]
    async fn suggestions_filtered_and_capped() {
        let server = MockServer::start().await;
        let mut places = vec![json!({"lat": "38.9", "lon": "-77.0", "display_name": "Far away"})];
        for i in 0..7 {
            places.push(json!({
                "lat": format!("40.7{i}"),
                "lon": "-73.98",
                "display_name": format!("Broadway {i}")
            }));
        }
        Mock::given(method("GET"))
            .and(query_param("q", "Broadway, New York City"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(places)))
            .mount(&server)
            .await;

        let suggestions = resolver_for(&server).suggest("Broadway").await;

        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0].label(), "Broadway 0");
        assert!(suggestions.iter().all(|s| s.label() != "Far away"));
    }
}

// ============================================================================
// Fare prediction
// ============================================================================

mod prediction_tests {
    use super::*;

    fn fare_service_for(server: &MockServer) -> FareService {
        let adapter =
            FarePredictionAdapter::new(PredictionConfig::for_testing(&server.uri())).unwrap();
        FareService::new(Arc::new(adapter))
    }

    fn default_quote_inputs() -> (TripSession, PassengerCount, PickupDateTime) {
        (
            TripSession::new(),
            PassengerCount::default(),
            PickupDateTime::default(),
        )
    }

    #[tokio::test]
    async fn quote_from_current_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predict"))
            .and(query_param("passenger_count", "2"))
            .and(query_param("pickup_datetime", "2013-07-06 17:18:00"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fare": 12.345})))
            .expect(1)
            .mount(&server)
            .await;

        let (session, passengers, when) = default_quote_inputs();
        let quote = fare_service_for(&server)
            .quote_session(&session, passengers, when)
            .await
            .unwrap();

        assert!((quote.fare - 12.35).abs() < 1e-9);
        assert_eq!(quote.source, FareSource::Fare);
    }

    #[tokio::test]
    async fn quote_from_legacy_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fare_amount": 9.1})))
            .mount(&server)
            .await;

        let (session, passengers, when) = default_quote_inputs();
        let quote = fare_service_for(&server)
            .quote_session(&session, passengers, when)
            .await
            .unwrap();

        assert!((quote.fare - 9.1).abs() < 1e-9);
        assert_eq!(quote.source, FareSource::FareAmount);
    }

    #[tokio::test]
    async fn unexpected_body_is_returned_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad input"})))
            .mount(&server)
            .await;

        let (session, passengers, when) = default_quote_inputs();
        let err = fare_service_for(&server)
            .quote_session(&session, passengers, when)
            .await
            .unwrap_err();

        assert_eq!(err, FareError::UnexpectedResponse(json!({"error": "bad input"})));
    }

    #[tokio::test]
    async fn slow_model_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"fare": 1.0}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let (session, passengers, when) = default_quote_inputs();
        let err = fare_service_for(&server)
            .quote_session(&session, passengers, when)
            .await
            .unwrap_err();

        assert_eq!(err, FareError::Timeout);
    }

    #[tokio::test]
    async fn server_error_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let (session, passengers, when) = default_quote_inputs();
        let err = fare_service_for(&server)
            .quote_session(&session, passengers, when)
            .await
            .unwrap_err();

        match err {
            FareError::Transport(msg) => assert!(msg.contains("500")),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn availability_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let adapter =
            FarePredictionAdapter::new(PredictionConfig::for_testing(&server.uri())).unwrap();
        assert!(adapter.is_available().await);
    }
}

// ============================================================================
// Sessions
// ============================================================================

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn session_round_trip_through_service() {
        let store = Arc::new(MokaSessionStore::with_config(SessionStoreConfig::default()));
        let service = SessionService::new(store);

        let session = service.load_or_default(None).await.unwrap();
        assert_eq!(service.active_sessions().await, 0);

        let updated = service
            .set_coordinates(session.id, LocationSlot::Pickup, 40.7484, -73.9857)
            .await
            .unwrap();
        assert!((updated.pickup.latitude() - 40.7484).abs() < 1e-9);

        let reloaded = service.load_or_default(Some(session.id)).await.unwrap();
        assert_eq!(reloaded.id, session.id);
        assert!((reloaded.pickup.latitude() - 40.7484).abs() < 1e-9);
        assert_eq!(service.active_sessions().await, 1);
    }

    #[tokio::test]
    async fn rejected_coordinates_leave_session_unchanged() {
        let store = Arc::new(MokaSessionStore::new());
        let service = SessionService::new(store);
        let session = service.load_or_default(None).await.unwrap();

        let err = service
            .set_coordinates(session.id, LocationSlot::Pickup, 42.0, -73.9)
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));

        let reloaded = service.load_or_default(Some(session.id)).await.unwrap();
        assert!(
            (reloaded.pickup.latitude() - session.pickup.latitude()).abs() < f64::EPSILON
        );
        assert_eq!(service.active_sessions().await, 0);
    }

    #[tokio::test]
    async fn reset_removes_stored_session() {
        let store = Arc::new(MokaSessionStore::new());
        let service = SessionService::new(store);
        let id = service.load_or_default(None).await.unwrap().id;
        service
            .set_coordinates(id, LocationSlot::Dropoff, 40.7, -74.0)
            .await
            .unwrap();

        let reset = service.reset(id).await.unwrap();
        assert_eq!(reset.id, id);
        assert_eq!(service.active_sessions().await, 0);
        let reloaded = service.load_or_default(Some(id)).await.unwrap();
        assert_eq!(reloaded.dropoff, reset.dropoff);
    }
}
