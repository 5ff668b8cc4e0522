use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::booking::payment::PaymentInfo;
use crate::flights::model::Seat;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("booking not found")]
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub passport_number: String,
    #[serde(default)]
    pub nationality: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BookingStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub flight_id: String,
    pub passengers: Vec<Passenger>,
    pub seats: Vec<Seat>,
    pub total_price: f64,
    pub currency: String,
    pub status: BookingStatus,
    pub booking_reference: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub flight_id: String,
    pub passengers: Vec<Passenger>,
    pub seats: Vec<Seat>,
    pub payment: PaymentInfo,
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.flight_id.trim().is_empty() {
            return Err("Flight ID cannot be empty".to_string());
        }

        if self.passengers.is_empty() {
            return Err("At least one passenger is required".to_string());
        }

        if self.seats.is_empty() {
            return Err("At least one seat selection is required".to_string());
        }

        Ok(())
    }
}

impl Booking {
    fn new(request: BookingRequest) -> Self {
        let total_price = request.seats.iter().map(|seat| seat.price).sum();
        let reference = format!("SKY{}", &Uuid::new_v4().simple().to_string()[..8]);

        Self {
            id: Uuid::new_v4(),
            flight_id: request.flight_id,
            passengers: request.passengers,
            seats: request.seats,
            total_price,
            currency: "USD".to_string(),
            status: BookingStatus::Confirmed,
            booking_reference: reference,
            created_at: Utc::now(),
        }
    }
}

/// In-memory booking store. Owns the map exclusively; callers only ever
/// receive clones.
pub struct BookingLedger {
    bookings: Mutex<HashMap<Uuid, Booking>>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// Stores a confirmed booking. Payment authorization must already have
    /// succeeded by the time this is called.
    pub fn create(&self, request: BookingRequest) -> Booking {
        let booking = Booking::new(request);

        self.bookings
            .lock()
            .unwrap()
            .insert(booking.id, booking.clone());

        info!(
            "Booking created - ID: {}, Reference: {}, Total: {} {}",
            booking.id, booking.booking_reference, booking.total_price, booking.currency
        );

        booking
    }

    pub fn get(&self, id: Uuid) -> Result<Booking, LedgerError> {
        self.bookings
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(LedgerError::NotFound)
    }

    /// Marks a booking cancelled. Cancelling twice is not an error and
    /// leaves the booking cancelled.
    pub fn cancel(&self, id: Uuid) -> Result<Booking, LedgerError> {
        let mut bookings = self.bookings.lock().unwrap();

        let booking = bookings.get_mut(&id).ok_or(LedgerError::NotFound)?;
        booking.status = BookingStatus::Cancelled;

        info!("Booking cancelled - ID: {}", id);
        Ok(booking.clone())
    }

    pub fn len(&self) -> usize {
        self.bookings.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}
