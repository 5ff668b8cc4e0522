use std::collections::HashMap;
use std::sync::Mutex;

use log::info;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::SUBSCRIBER_CHANNEL_SIZE;
use crate::pricing::hub::PriceUpdate;

pub type SubscriberId = Uuid;

/// Thread-safe set of live price-feed connections. An entry is live from
/// `register` until it is removed, either explicitly by its connection
/// handler or by the hub when delivery fails.
pub struct SubscriberRegistry {
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<PriceUpdate>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Creates the outbound channel for a new connection and registers its
    /// sending half. The registry allocating the handle itself guarantees
    /// no two live entries ever share one.
    pub fn register(&self) -> (SubscriberId, mpsc::Receiver<PriceUpdate>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CHANNEL_SIZE);

        self.subscribers.lock().unwrap().insert(id, tx);
        info!("Subscriber {} registered. Total subscribers: {}", id, self.len());

        (id, rx)
    }

    /// Removes a subscriber. Idempotent: both the connection handler and
    /// the hub's eviction path may race to remove the same entry.
    pub fn unregister(&self, id: &SubscriberId) -> bool {
        let removed = self.subscribers.lock().unwrap().remove(id).is_some();

        if removed {
            info!("Subscriber {} removed. Total subscribers: {}", id, self.len());
        }

        removed
    }

    /// Copy-on-iterate view for a delivery pass. Entries removed after the
    /// snapshot was taken simply fail their send; entries added after it
    /// catch the next event.
    pub fn snapshot(&self) -> Vec<(SubscriberId, mpsc::Sender<PriceUpdate>)> {
        self.subscribers
            .lock()
            .map(|subs| subs.iter().map(|(id, tx)| (*id, tx.clone())).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.subscribers
            .lock()
            .map(|subs| subs.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}
