use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use log::{error, info, warn};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::WebSocketStream;

use crate::pricing::registry::{SubscriberId, SubscriberRegistry};
use crate::pricing::PriceUpdate;

pub const PRICE_FEED_PATH: &str = "/ws/prices";

/// One live price-feed connection. Registers with the subscriber registry
/// for its lifetime; read errors, write errors and client-initiated closes
/// all end in the same place: removal from the registry and connection
/// teardown.
pub struct PriceFeedHandler {
    registry: Arc<SubscriberRegistry>,
    peer_addr: String,
}

impl PriceFeedHandler {
    pub fn new(registry: Arc<SubscriberRegistry>, peer_addr: String) -> Self {
        Self {
            registry,
            peer_addr,
        }
    }

    pub async fn handle_connection(self, stream: TcpStream) {
        let ws_stream = match accept_hdr_async(stream, |req: &Request, response: Response| {
            let path = req.uri().path();

            if path == PRICE_FEED_PATH {
                Ok(response)
            } else {
                warn!("Unknown WebSocket path '{}' from {}", path, self.peer_addr);
                Err(Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Some("Invalid WebSocket path".to_string()))
                    .unwrap())
            }
        })
        .await
        {
            Ok(ws) => ws,
            Err(e) => {
                error!("WebSocket handshake failed for {}: {:?}", self.peer_addr, e);
                return;
            }
        };

        self.stream_prices(ws_stream).await;
    }

    async fn stream_prices(&self, ws_stream: WebSocketStream<TcpStream>) {
        let (write, read) = ws_stream.split();
        let (subscriber_id, updates_rx) = self.registry.register();

        info!(
            "Price feed connected - Subscriber: {} from {}",
            subscriber_id, self.peer_addr
        );

        // Close signal from the read task to the write task
        let (close_tx, close_rx) = mpsc::channel::<()>(1);

        let write_task = spawn_write_task(write, updates_rx, close_rx);
        let read_task = spawn_read_task(read, close_tx, subscriber_id);

        tokio::select! {
            _ = write_task => {
                info!("Write task completed for subscriber {}", subscriber_id);
            }
            _ = read_task => {
                info!("Read task completed for subscriber {}", subscriber_id);
            }
        }

        self.registry.unregister(&subscriber_id);

        info!(
            "Price feed disconnected - Subscriber: {} from {}",
            subscriber_id, self.peer_addr
        );
    }
}

fn spawn_write_task(
    mut write: futures::stream::SplitSink<WebSocketStream<TcpStream>, Message>,
    mut updates_rx: mpsc::Receiver<PriceUpdate>,
    mut close_rx: mpsc::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                maybe_update = updates_rx.recv() => {
                    match maybe_update {
                        Some(update) => {
                            let json = match update.to_json() {
                                Ok(json) => json,
                                Err(e) => {
                                    error!("Failed to serialize price update: {}", e);
                                    continue;
                                }
                            };

                            if let Err(e) = write.send(Message::Text(json)).await {
                                error!("Error sending price update: {:?}", e);
                                break;
                            }
                        }
                        None => {
                            // Evicted by the hub; tell the client we're done
                            let _ = write.send(Message::Close(None)).await;
                            break;
                        }
                    }
                }
                _ = close_rx.recv() => {
                    info!("Received close signal from read task");
                    break;
                }
            }
        }
    })
}

fn spawn_read_task(
    mut read: futures::stream::SplitStream<WebSocketStream<TcpStream>>,
    close_tx: mpsc::Sender<()>,
    subscriber_id: SubscriberId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        // Client messages are read only to detect disconnect; their content
        // is ignored.
        while let Some(msg_result) = read.next().await {
            match msg_result {
                Ok(Message::Close(frame)) => {
                    info!(
                        "Subscriber {} sent close frame: {:?}",
                        subscriber_id, frame
                    );
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Error reading from subscriber {}: {:?}", subscriber_id, e);
                    break;
                }
            }
        }

        let _ = close_tx.send(()).await;
    })
}
