use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use skybook::api::{create_api_router, ApiState};
use skybook::booking::BookingLedger;
use skybook::flights::FlightAggregator;

fn test_app() -> (axum::Router, Arc<BookingLedger>) {
    let ledger = Arc::new(BookingLedger::new());
    let state = ApiState {
        aggregator: Arc::new(FlightAggregator::with_mock_sources()),
        ledger: ledger.clone(),
    };

    (create_api_router(state), ledger)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn search_body() -> Value {
    json!({
        "origin": "JFK",
        "destination": "LAX",
        "departureDate": "2026-09-01",
        "passengers": 2,
        "class": "economy"
    })
}

fn booking_body(card_number: &str) -> Value {
    json!({
        "flightId": "flight-1",
        "passengers": [{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "dateOfBirth": "1990-01-01"
        }],
        "seats": [
            {"id": "flight-1-12A", "row": 12, "column": "A", "type": "window", "status": "selected", "price": 30.0},
            {"id": "flight-1-12B", "row": 12, "column": "B", "type": "middle", "status": "selected", "price": 45.0}
        ],
        "payment": {
            "cardNumber": card_number,
            "cardHolder": "Ada Lovelace",
            "expiryDate": "12/30",
            "cvv": "123"
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = test_app();

    let response = app
        .oneshot(empty_request("GET", "/api/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_search_returns_flights_from_all_sources() {
    let (app, _) = test_app();

    let response = app
        .oneshot(json_request("POST", "/api/flights/search", search_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["success"], true);
    let total = body["total"].as_u64().unwrap();
    assert!((6..=12).contains(&total), "unexpected total {}", total);
    assert_eq!(body["flights"].as_array().unwrap().len() as u64, total);
    assert_eq!(body["flights"][0]["origin"]["code"], "JFK");
}

#[tokio::test]
async fn test_search_rejects_zero_passengers() {
    let (app, _) = test_app();

    let mut body = search_body();
    body["passengers"] = json!(0);

    let response = app
        .oneshot(json_request("POST", "/api/flights/search", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_flight_echoes_id() {
    let (app, _) = test_app();

    let response = app
        .oneshot(empty_request("GET", "/api/flights/flight-7"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["flight"]["id"], "flight-7");
}

#[tokio::test]
async fn test_seat_map_has_full_cabin() {
    let (app, _) = test_app();

    let response = app
        .oneshot(empty_request("GET", "/api/flights/flight-1/seats"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 180);
    assert_eq!(body["seats"][0]["type"], "window");
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let (app, _) = test_app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            booking_body("4242424242424242"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["booking"]["totalPrice"], 75.0);
    assert_eq!(body["booking"]["status"], "confirmed");
    assert!(body["booking"]["bookingReference"]
        .as_str()
        .unwrap()
        .starts_with("SKY"));

    let booking_id = body["booking"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/bookings/{}", booking_id);

    // Get
    let response = app.clone().oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["booking"]["totalPrice"], 75.0);

    // Cancel
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["booking"]["status"], "cancelled");

    // Cancelling again is allowed and leaves the booking cancelled
    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["booking"]["status"], "cancelled");
}

#[tokio::test]
async fn test_short_card_number_fails_payment_and_persists_nothing() {
    let (app, ledger) = test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/bookings",
            booking_body("1234567890"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Payment failed");

    assert!(ledger.is_empty());
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let (app, _) = test_app();

    let uri = format!("/api/bookings/{}", Uuid::new_v4());
    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_booking_id_is_rejected() {
    let (app, _) = test_app();

    let response = app
        .oneshot(empty_request("GET", "/api/bookings/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
