//! TaxiFare HTTP presentation layer
//!
//! The form page, the JSON API behind it and the health endpoints.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod page;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use page::{PageError, PageRenderer};
pub use routes::{apply_middleware, create_router};
pub use state::AppState;
