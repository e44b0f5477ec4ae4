//! Value Objects - Immutable, identity-less domain primitives

mod geo_location;
mod location_slot;
mod passenger_count;
mod pickup_datetime;
mod service_area;
mod session_id;

pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use location_slot::LocationSlot;
pub use passenger_count::PassengerCount;
pub use pickup_datetime::PickupDateTime;
pub use service_area::ServiceArea;
pub use session_id::SessionId;
