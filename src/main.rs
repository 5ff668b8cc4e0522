use std::future::IntoFuture;
use std::sync::Arc;

use log::{error, info};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;

use skybook::api::{create_api_router, ApiState};
use skybook::booking::BookingLedger;
use skybook::config::{Config, PRICE_QUEUE_CAPACITY};
use skybook::flights::FlightAggregator;
use skybook::pricing::{BroadcastHub, PricePublisher};
use skybook::websocket::{PriceFeedHandler, PRICE_FEED_PATH};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(&config.log_level));

    config.log_config();

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        return Err(e.into());
    }

    // Services are constructed once here and injected into the handlers
    // that need them
    let aggregator = Arc::new(FlightAggregator::with_mock_sources());
    let ledger = Arc::new(BookingLedger::new());

    let (price_feed, hub) = BroadcastHub::new(PRICE_QUEUE_CAPACITY);
    let registry = hub.registry();
    tokio::spawn(hub.run());

    // The sender must outlive the servers: dropping it stops the publisher
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let publisher = PricePublisher::new(price_feed, registry.clone());
    tokio::spawn(publisher.run(shutdown_rx));

    // Start API server
    let api_state = ApiState { aggregator, ledger };
    let api_router = create_api_router(api_state)
        .layer(CorsLayer::permissive()); // Enable CORS for web clients

    let api_listener = TcpListener::bind(&config.api_bind_address).await?;
    info!("🌐 HTTP API server running at http://{}/api", config.api_bind_address);

    let api_server = axum::serve(api_listener, api_router).into_future();

    // Start WebSocket server
    let ws_listener = TcpListener::bind(&config.ws_bind_address).await?;
    info!(
        "📡 Price feed running at ws://{}{}",
        config.ws_bind_address, PRICE_FEED_PATH
    );

    let websocket_server = async move {
        while let Ok((stream, addr)) = ws_listener.accept().await {
            let handler = PriceFeedHandler::new(registry.clone(), addr.to_string());
            tokio::spawn(handler.handle_connection(stream));
        }
    };

    // Run both servers concurrently
    info!("🚀 Starting WebSocket and HTTP API servers...");
    tokio::select! {
        result = api_server => {
            error!("API server stopped: {:?}", result);
        }
        _ = websocket_server => {
            error!("WebSocket server stopped");
        }
    }

    Ok(())
}
