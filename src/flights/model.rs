use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CabinClass {
    #[serde(rename = "economy")]
    Economy,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "first")]
    First,
}

/// One itinerary as returned by a GDS source. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    pub id: String,
    pub flight_number: String,
    pub airline: String,
    pub airline_logo: String,
    pub origin: Airport,
    pub destination: Airport,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
    pub price: f64,
    pub currency: String,
    pub stops: u32,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub layovers: Vec<Airport>,
    pub available_seats: u32,
    pub class: CabinClass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub passengers: u32,
    pub class: CabinClass,
}

impl SearchParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.trim().is_empty() {
            return Err("Origin cannot be empty".to_string());
        }

        if self.destination.trim().is_empty() {
            return Err("Destination cannot be empty".to_string());
        }

        if self.passengers == 0 {
            return Err("Passenger count must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SeatType {
    #[serde(rename = "window")]
    Window,
    #[serde(rename = "middle")]
    Middle,
    #[serde(rename = "aisle")]
    Aisle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SeatStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "occupied")]
    Occupied,
    #[serde(rename = "selected")]
    Selected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: String,
    pub row: u32,
    pub column: String,
    #[serde(rename = "type")]
    pub seat_type: SeatType,
    pub status: SeatStatus,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_params() -> SearchParams {
        SearchParams {
            origin: "JFK".to_string(),
            destination: "LAX".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            return_date: None,
            passengers: 2,
            class: CabinClass::Economy,
        }
    }

    #[test]
    fn test_valid_params_pass_validation() {
        assert!(valid_params().validate().is_ok());
    }

    #[test]
    fn test_empty_origin_rejected() {
        let mut params = valid_params();
        params.origin = "  ".to_string();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_passengers_rejected() {
        let mut params = valid_params();
        params.passengers = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_search_params_deserialization() {
        let json = r#"
            {
                "origin": "JFK",
                "destination": "LHR",
                "departureDate": "2026-12-25",
                "passengers": 1,
                "class": "economy"
            }
        "#;
        let params: SearchParams = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(params.origin, "JFK");
        assert_eq!(params.departure_date, NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        assert_eq!(params.class, CabinClass::Economy);
        assert!(params.return_date.is_none());
    }

    #[test]
    fn test_flight_serializes_camel_case() {
        let flight = Flight {
            id: "f-1".to_string(),
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
            departure_time: Utc::now(),
            arrival_time: Utc::now(),
            duration: 360,
            price: 450.0,
            currency: "USD".to_string(),
            stops: 0,
            layovers: Vec::new(),
            available_seats: 120,
            class: CabinClass::Economy,
        };

        let json = serde_json::to_string(&flight).unwrap();
        assert!(json.contains("\"flightNumber\":\"UA1234\""));
        assert!(json.contains("\"availableSeats\":120"));
        assert!(json.contains("\"class\":\"economy\""));
        assert!(!json.contains("layovers"));
    }
}
