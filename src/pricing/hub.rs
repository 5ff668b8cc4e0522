use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::pricing::registry::SubscriberRegistry;

/// One price-change event. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdate {
    pub flight_id: String,
    pub new_price: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceUpdate {
    pub fn new(flight_id: impl Into<String>, new_price: f64) -> Self {
        Self {
            flight_id: flight_id.into(),
            new_price,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Producer half of the hub's bounded event queue.
#[derive(Clone)]
pub struct PriceFeed {
    tx: mpsc::Sender<PriceUpdate>,
}

impl PriceFeed {
    /// Try-enqueue, discard on failure. Price ticks are lossy by design:
    /// when the hub falls behind, the newest event is dropped rather than
    /// ever blocking the producer.
    pub fn publish(&self, update: PriceUpdate) -> bool {
        match self.tx.try_send(update) {
            Ok(()) => true,
            Err(TrySendError::Full(update)) => {
                warn!("Price queue full, dropping update for {}", update.flight_id);
                false
            }
            Err(TrySendError::Closed(update)) => {
                warn!("Price queue closed, dropping update for {}", update.flight_id);
                false
            }
        }
    }
}

/// Drains the bounded event queue and pushes every event to every live
/// subscriber, evicting subscribers whose connection has gone away.
pub struct BroadcastHub {
    registry: Arc<SubscriberRegistry>,
    rx: mpsc::Receiver<PriceUpdate>,
}

impl BroadcastHub {
    pub fn new(queue_capacity: usize) -> (PriceFeed, Self) {
        let (tx, rx) = mpsc::channel(queue_capacity);

        let hub = Self {
            registry: Arc::new(SubscriberRegistry::new()),
            rx,
        };

        (PriceFeed { tx }, hub)
    }

    pub fn registry(&self) -> Arc<SubscriberRegistry> {
        self.registry.clone()
    }

    /// Delivery loop. Runs until every `PriceFeed` handle has been dropped.
    pub async fn run(mut self) {
        info!("Broadcast hub started");

        while let Some(update) = self.rx.recv().await {
            self.deliver(update);
        }

        info!("Broadcast hub stopped: price feed closed");
    }

    fn deliver(&self, update: PriceUpdate) {
        for (id, tx) in self.registry.snapshot() {
            match tx.try_send(update.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    // Slow consumer. Dropping its copy keeps one laggard
                    // from stalling the delivery pass for everyone else.
                    warn!("Subscriber {} lagging, dropping update for it", id);
                }
                Err(TrySendError::Closed(_)) => {
                    if self.registry.unregister(&id) {
                        info!("Evicted disconnected subscriber {}", id);
                    }
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn try_recv(&mut self) -> Option<PriceUpdate> {
        self.rx.try_recv().ok()
    }
}
