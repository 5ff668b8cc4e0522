use std::env;

// Server Configuration
pub const DEFAULT_API_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_WS_BIND_ADDRESS: &str = "127.0.0.1:8081";

// Simulated GDS sources queried by the flight aggregator
pub const GDS_SOURCES: [&str; 3] = ["Amadeus", "Sabre", "Travelport"];

// Live price feed configuration
pub const PRICE_TICK_INTERVAL_SECS: u64 = 5;
pub const PRICE_QUEUE_CAPACITY: usize = 100;
pub const SUBSCRIBER_CHANNEL_SIZE: usize = 32;
pub const TRACKED_FLIGHT_IDS: [&str; 5] =
    ["flight-1", "flight-2", "flight-3", "flight-4", "flight-5"];
pub const PRICE_BASELINE: f64 = 400.0;
pub const PRICE_SPREAD: f64 = 25.0;

// Payment Configuration
pub const MIN_CARD_NUMBER_LEN: usize = 13;
pub const PAYMENT_PROCESSING_MS: u64 = 500;

pub struct Config {
    pub api_bind_address: String,
    pub ws_bind_address: String,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_bind_address: env::var("API_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_API_BIND_ADDRESS.to_string()),
            ws_bind_address: env::var("WS_BIND_ADDRESS")
                .unwrap_or_else(|_| DEFAULT_WS_BIND_ADDRESS.to_string()),
            log_level: env::var("RUST_LOG")
                .unwrap_or_else(|_| "info".to_string()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid API bind address: {}", self.api_bind_address));
        }

        if self.ws_bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!("Invalid WebSocket bind address: {}", self.ws_bind_address));
        }

        if self.api_bind_address == self.ws_bind_address {
            return Err("API and WebSocket servers cannot share a bind address".to_string());
        }

        Ok(())
    }

    pub fn log_config(&self) {
        log::info!("Server Configuration:");
        log::info!("  API Bind Address: {}", self.api_bind_address);
        log::info!("  WebSocket Bind Address: {}", self.ws_bind_address);
        log::info!("  Log Level: {}", self.log_level);
    }
}
