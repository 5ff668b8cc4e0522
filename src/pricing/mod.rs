pub mod hub;
pub mod publisher;
pub mod registry;

pub use hub::{BroadcastHub, PriceFeed, PriceUpdate};
pub use publisher::PricePublisher;
pub use registry::{SubscriberId, SubscriberRegistry};
