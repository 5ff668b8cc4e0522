use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use log::info;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::flights::model::{Airport, CabinClass, Flight, SearchParams, Seat, SeatStatus, SeatType};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source {0} unavailable")]
    Unavailable(String),
}

/// One external flight inventory provider. Implementations may be slow and
/// may fail independently of each other.
#[async_trait]
pub trait FlightSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<Flight>, SourceError>;
}

const AIRLINES: [(&str, &str); 6] = [
    ("United Airlines", "UA"),
    ("Delta", "DL"),
    ("American Airlines", "AA"),
    ("Emirates", "EK"),
    ("Lufthansa", "LH"),
    ("British Airways", "BA"),
];

/// Simulated GDS backend. Sleeps 100-300ms per query and fabricates 2-4
/// itineraries matching the requested route.
pub struct MockGdsSource {
    name: String,
}

impl MockGdsSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl FlightSource for MockGdsSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, params: &SearchParams) -> Result<Vec<Flight>, SourceError> {
        let (latency_ms, num_flights) = {
            let mut rng = rand::thread_rng();
            (rng.gen_range(100..300), rng.gen_range(2..=4))
        };

        // Simulate network latency against the external system
        tokio::time::sleep(Duration::from_millis(latency_ms)).await;

        let mut flights = Vec::with_capacity(num_flights);
        let mut rng = rand::thread_rng();
        let departure_day = params
            .departure_date
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default()
            .and_utc();

        for i in 0..num_flights {
            let (airline, code) = AIRLINES[rng.gen_range(0..AIRLINES.len())];
            let departure_time =
                departure_day + ChronoDuration::hours(6 + (i as i64) * 3 + rng.gen_range(0..3));
            let duration = rng.gen_range(120..420);
            let arrival_time = departure_time + ChronoDuration::minutes(duration as i64);

            flights.push(Flight {
                id: Uuid::new_v4().to_string(),
                flight_number: format!("{}{}", code, rng.gen_range(1000..10000)),
                airline: airline.to_string(),
                airline_logo: String::new(),
                origin: route_airport(&params.origin),
                destination: route_airport(&params.destination),
                departure_time,
                arrival_time,
                duration,
                price: rng.gen_range(200..1000) as f64,
                currency: "USD".to_string(),
                stops: rng.gen_range(0..3),
                layovers: Vec::new(),
                available_seats: rng.gen_range(50..200),
                class: params.class.clone(),
            });
        }

        info!("{} returned {} flights", self.name, flights.len());
        Ok(flights)
    }
}

fn route_airport(code: &str) -> Airport {
    Airport {
        code: code.to_string(),
        name: format!("{} International Airport", code),
        city: code.to_string(),
        country: "USA".to_string(),
    }
}

/// Lookup of a single itinerary by id. Backed by mock data; a real
/// deployment would resolve this against the booking inventory.
pub fn flight_by_id(id: &str) -> Flight {
    let now = Utc::now();
    Flight {
        id: id.to_string(),
        flight_number: "UA1234".to_string(),
        airline: "United Airlines".to_string(),
        airline_logo: String::new(),
        origin: Airport {
            code: "JFK".to_string(),
            name: "John F. Kennedy International Airport".to_string(),
            city: "New York".to_string(),
            country: "USA".to_string(),
        },
        destination: Airport {
            code: "LAX".to_string(),
            name: "Los Angeles International Airport".to_string(),
            city: "Los Angeles".to_string(),
            country: "USA".to_string(),
        },
        departure_time: now + ChronoDuration::hours(24),
        arrival_time: now + ChronoDuration::hours(30),
        duration: 360,
        price: 450.0,
        currency: "USD".to_string(),
        stops: 0,
        layovers: Vec::new(),
        available_seats: 120,
        class: CabinClass::Economy,
    }
}

/// Generated cabin layout: 30 rows of A-F with roughly 30% of seats occupied.
pub fn seat_map(flight_id: &str) -> Vec<Seat> {
    const COLUMNS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

    let mut rng = rand::thread_rng();
    let mut seats = Vec::with_capacity(30 * COLUMNS.len());

    for row in 1..=30u32 {
        for col in COLUMNS {
            let seat_type = match col {
                "A" | "F" => SeatType::Window,
                "C" | "D" => SeatType::Aisle,
                _ => SeatType::Middle,
            };

            let status = if rng.gen::<f32>() < 0.3 {
                SeatStatus::Occupied
            } else {
                SeatStatus::Available
            };

            seats.push(Seat {
                id: format!("{}-{}{}", flight_id, row, col),
                row,
                column: col.to_string(),
                seat_type,
                status,
                price: 0.0,
            });
        }
    }

    seats
}
