//! Integration tests for the prediction client using wiremock
//!
//! These tests verify the wire format of prediction requests and the
//! client's handling of slow, failing and odd responses.

use std::time::Duration;

use domain::{FareRequest, LocationSlot, PassengerCount, PickupDateTime, TripSession};
use integration_prediction::{PredictionClient, PredictionConfig, PredictionError, TaxiFareClient};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_request() -> FareRequest {
    let mut session = TripSession::new();
    session
        .set_coordinates(LocationSlot::Pickup, 40.758, -73.9855)
        .unwrap();
    session
        .set_coordinates(LocationSlot::Dropoff, 40.7484, -73.9857)
        .unwrap();
    FareRequest::from_session(
        &session,
        PassengerCount::new(3).unwrap(),
        PickupDateTime::parse("2014-01-02 03:04:05").unwrap(),
    )
}

fn client_for(server: &MockServer) -> TaxiFareClient {
    TaxiFareClient::new(PredictionConfig::for_testing(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_predict_sends_all_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .and(query_param("pickup_datetime", "2014-01-02 03:04:05"))
        .and(query_param("pickup_longitude", "-73.9855"))
        .and(query_param("pickup_latitude", "40.758"))
        .and(query_param("dropoff_longitude", "-73.9857"))
        .and(query_param("dropoff_latitude", "40.7484"))
        .and(query_param("passenger_count", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fare": 12.345})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap();
    assert_eq!(body, json!({"fare": 12.345}));
}

#[tokio::test]
async fn test_predict_returns_legacy_key_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fare_amount": 9.1})))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap();
    assert_eq!(body, json!({"fare_amount": 9.1}));
}

#[tokio::test]
async fn test_predict_unexpected_shape_is_still_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"other": 1})))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap();
    assert_eq!(body["other"], 1);
}

#[tokio::test]
async fn test_predict_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"fare": 10.0}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::Timeout { timeout_secs: 1 }));
}

#[tokio::test]
async fn test_predict_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model crashed"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap_err();
    match err {
        PredictionError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model crashed");
        },
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_predict_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fare: twelve"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .predict(&sample_request())
        .await
        .unwrap_err();
    assert!(matches!(err, PredictionError::ParseError(_)));
}

#[tokio::test]
async fn test_predict_connection_refused() {
    // Nothing listens on port 1
    let client = TaxiFareClient::new(PredictionConfig::for_testing("http://127.0.0.1:1")).unwrap();
    let err = client.predict(&sample_request()).await.unwrap_err();
    assert!(matches!(err, PredictionError::ConnectionFailed(_)));
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"greeting": "Hello"})))
        .mount(&server)
        .await;

    assert!(client_for(&server).is_healthy().await);
}

#[tokio::test]
async fn test_health_check_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert!(!client_for(&server).is_healthy().await);
}
