//! Application layer - Use cases and orchestration
//!
//! Address resolution, fare requests and session handling, expressed
//! against ports that the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, FareError, ResolveError};
pub use ports::*;
pub use services::*;
