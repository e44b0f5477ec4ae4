//! Domain entities - Objects with identity and lifecycle

mod fare_request;
mod location;
mod trip_session;

pub use fare_request::{FareQuote, FareRequest, FareSource};
pub use location::Location;
pub use trip_session::TripSession;
