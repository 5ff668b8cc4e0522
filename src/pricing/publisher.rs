use std::sync::Arc;
use std::time::Duration;

use log::info;
use rand::Rng;
use tokio::sync::watch;
use tokio::time::interval;

use crate::config::{PRICE_BASELINE, PRICE_SPREAD, PRICE_TICK_INTERVAL_SECS, TRACKED_FLIGHT_IDS};
use crate::pricing::hub::{PriceFeed, PriceUpdate};
use crate::pricing::registry::SubscriberRegistry;

/// Periodic producer of simulated price movement. One event per tick,
/// enqueued with the feed's drop-on-full policy.
pub struct PricePublisher {
    feed: PriceFeed,
    registry: Arc<SubscriberRegistry>,
    period: Duration,
}

impl PricePublisher {
    pub fn new(feed: PriceFeed, registry: Arc<SubscriberRegistry>) -> Self {
        Self::with_period(feed, registry, Duration::from_secs(PRICE_TICK_INTERVAL_SECS))
    }

    pub fn with_period(
        feed: PriceFeed,
        registry: Arc<SubscriberRegistry>,
        period: Duration,
    ) -> Self {
        Self {
            feed,
            registry,
            period,
        }
    }

    /// Tick loop. Runs until the shutdown flag flips (or its sender is
    /// dropped); the baseline deployment never exercises that path and
    /// simply runs for the life of the process.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.period);
        info!("Price publisher started, ticking every {:?}", self.period);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // No subscribers means no work to produce
                    if self.registry.is_empty() {
                        continue;
                    }

                    self.feed.publish(Self::next_update());
                }
                _ = shutdown.changed() => {
                    info!("Price publisher stopped");
                    break;
                }
            }
        }
    }

    fn next_update() -> PriceUpdate {
        let mut rng = rand::thread_rng();
        let flight_id = TRACKED_FLIGHT_IDS[rng.gen_range(0..TRACKED_FLIGHT_IDS.len())];
        let perturbation = (rng.gen::<f64>() - 0.5) * 2.0 * PRICE_SPREAD;

        PriceUpdate::new(flight_id, PRICE_BASELINE + perturbation)
    }
}
