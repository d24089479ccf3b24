//! HTTP API for the price predictor.

pub mod error;
pub mod routes;

pub use routes::{create_router, AppState};
