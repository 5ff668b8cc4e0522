pub mod handler;

pub use handler::{PriceFeedHandler, PRICE_FEED_PATH};
