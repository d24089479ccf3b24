//! Prediction API router and handlers.

use axum::extract::State;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, trace};

use crate::predict::{Prediction, Predictor, PropertyInput};
use crate::web::error::ApiError;

/// State shared by every request; artifacts are read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor: Arc::new(predictor),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/predict/", post(predict))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    trace!("health check requested");
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Malformed bodies and unknown enum values are rejected by the `Json`
/// extractor before this runs
async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PropertyInput>,
) -> Result<Json<Prediction>, ApiError> {
    input.validate()?;
    let prediction = state.predictor.predict(&input)?;
    info!(
        property_type = input.property_type.label(),
        suburb = input.suburb.label(),
        price = prediction.predicted_price,
        "Predicted price"
    );
    Ok(Json(prediction))
}
