//! Services layer for the Sparkmon dashboard
//!
//! Provides access to the Spark monitoring REST API.

pub mod status_api;

pub use status_api::{HttpStatusSource, StatusSource};
