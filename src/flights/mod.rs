pub mod aggregator;
pub mod model;
pub mod source;

pub use aggregator::{FlightAggregator, SearchError};
pub use model::{Airport, CabinClass, Flight, SearchParams, Seat, SeatStatus, SeatType};
pub use source::{FlightSource, MockGdsSource, SourceError};
