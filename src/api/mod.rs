pub mod handlers;

pub use handlers::{create_api_router, ApiState, BookingResponse, SearchResponse};
