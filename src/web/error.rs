use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::predict::schema::ValidationError;
use crate::predict::service::PredictError;

/// Errors returned from API handlers as `{"detail": ...}` bodies
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation(e) => warn!(error = %e, "Rejected prediction request"),
            Self::Prediction(e) => error!(error = %e, "Prediction failed"),
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
