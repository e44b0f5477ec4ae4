//! HTTP request handlers

pub mod common;
pub mod fare;
pub mod health;
pub mod locations;
pub mod page;
pub mod session;
