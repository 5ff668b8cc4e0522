use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::booking::{authorize, Booking, BookingLedger, BookingRequest};
use crate::flights::model::{Flight, SearchParams, Seat};
use crate::flights::source;
use crate::flights::FlightAggregator;

#[derive(Clone)]
pub struct ApiState {
    pub aggregator: Arc<FlightAggregator>,
    pub ledger: Arc<BookingLedger>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub message: String,
    pub flights: Vec<Flight>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlightResponse {
    pub success: bool,
    pub flight: Flight,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeatMapResponse {
    pub success: bool,
    pub seats: Vec<Seat>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingResponse {
    pub success: bool,
    pub message: String,
    pub booking: Option<Booking>,
}

// POST /api/flights/search - Fan a search out to every GDS source
pub async fn search_flights(
    State(state): State<ApiState>,
    Json(params): Json<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<SearchResponse>)> {
    if let Err(e) = params.validate() {
        warn!("Rejected search request: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(SearchResponse {
                success: false,
                message: e,
                flights: Vec::new(),
                total: 0,
            }),
        ));
    }

    match state.aggregator.search(&params).await {
        Ok(flights) => Ok(Json(SearchResponse {
            success: true,
            message: "Search completed".to_string(),
            total: flights.len(),
            flights,
        })),
        Err(e) => {
            error!("Flight search failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse {
                    success: false,
                    message: "Failed to search flights".to_string(),
                    flights: Vec::new(),
                    total: 0,
                }),
            ))
        }
    }
}

// GET /api/flights/{flight_id} - Look up a single itinerary
pub async fn get_flight(Path(flight_id): Path<String>) -> Json<FlightResponse> {
    Json(FlightResponse {
        success: true,
        flight: source::flight_by_id(&flight_id),
    })
}

// GET /api/flights/{flight_id}/seats - Cabin layout for seat selection
pub async fn get_seats(Path(flight_id): Path<String>) -> Json<SeatMapResponse> {
    let seats = source::seat_map(&flight_id);

    Json(SeatMapResponse {
        success: true,
        total: seats.len(),
        seats,
    })
}

// POST /api/bookings - Authorize payment, then persist the booking
pub async fn create_booking(
    State(state): State<ApiState>,
    Json(request): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), (StatusCode, Json<BookingResponse>)> {
    if let Err(e) = request.validate() {
        warn!("Rejected booking request: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(BookingResponse {
                success: false,
                message: e,
                booking: None,
            }),
        ));
    }

    // Payment comes first; nothing is persisted if it fails
    if authorize(&request.payment).await.is_err() {
        return Err((
            StatusCode::PAYMENT_REQUIRED,
            Json(BookingResponse {
                success: false,
                message: "Payment failed".to_string(),
                booking: None,
            }),
        ));
    }

    let booking = state.ledger.create(request);
    info!("Booking created successfully: {}", booking.id);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            success: true,
            message: "Booking confirmed".to_string(),
            booking: Some(booking),
        }),
    ))
}

// GET /api/bookings/{booking_id} - Fetch one booking
pub async fn get_booking(
    State(state): State<ApiState>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, (StatusCode, Json<BookingResponse>)> {
    let id = parse_booking_id(&booking_id)?;

    match state.ledger.get(id) {
        Ok(booking) => Ok(Json(BookingResponse {
            success: true,
            message: "Booking retrieved successfully".to_string(),
            booking: Some(booking),
        })),
        Err(e) => Err((
            StatusCode::NOT_FOUND,
            Json(BookingResponse {
                success: false,
                message: e.to_string(),
                booking: None,
            }),
        )),
    }
}

// DELETE /api/bookings/{booking_id} - Cancel a booking
pub async fn cancel_booking(
    State(state): State<ApiState>,
    Path(booking_id): Path<String>,
) -> Result<Json<BookingResponse>, (StatusCode, Json<BookingResponse>)> {
    let id = parse_booking_id(&booking_id)?;

    match state.ledger.cancel(id) {
        Ok(booking) => {
            info!("Booking cancelled successfully: {}", booking.id);
            Ok(Json(BookingResponse {
                success: true,
                message: "Booking cancelled successfully".to_string(),
                booking: Some(booking),
            }))
        }
        Err(e) => {
            warn!("Failed to cancel booking {}: {}", booking_id, e);
            Err((
                StatusCode::NOT_FOUND,
                Json(BookingResponse {
                    success: false,
                    message: e.to_string(),
                    booking: None,
                }),
            ))
        }
    }
}

fn parse_booking_id(raw: &str) -> Result<Uuid, (StatusCode, Json<BookingResponse>)> {
    Uuid::parse_str(raw).map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(BookingResponse {
                success: false,
                message: "Invalid booking ID format".to_string(),
                booking: None,
            }),
        )
    })
}

// GET /api/health - Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "skybook_api",
        "timestamp": chrono::Utc::now()
    }))
}

// Create the API router
pub fn create_api_router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/flights/search", post(search_flights))
        .route("/flights/:flight_id", get(get_flight))
        .route("/flights/:flight_id/seats", get(get_seats))
        .route("/bookings", post(create_booking))
        .route("/bookings/:booking_id", get(get_booking))
        .route("/bookings/:booking_id", delete(cancel_booking))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}
