//! Fare prediction integration for TaxiFare
//!
//! HTTP client for the remote taxi fare model. The service takes one GET
//! request on `/predict` with six query parameters and answers with a JSON
//! object carrying the fare under `fare` (current) or `fare_amount` (older
//! deployments). This crate returns the body untouched; deciding which key
//! to trust happens in the application layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_prediction::{PredictionClient, PredictionConfig, TaxiFareClient};
//!
//! let client = TaxiFareClient::new(PredictionConfig::default())?;
//! let body = client.predict(&fare_request).await?;
//! ```

mod client;
mod config;
mod error;

pub use client::{PredictionClient, TaxiFareClient};
pub use config::PredictionConfig;
pub use error::PredictionError;
