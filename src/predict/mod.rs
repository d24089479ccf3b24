//! Price prediction from property attributes.

pub mod artifacts;
pub mod features;
pub mod model;
pub mod scaler;
pub mod schema;
pub mod service;

pub use artifacts::ArtifactError;
pub use features::{FeatureEncoder, FeatureRow, NumericScaling, FEATURE_COLUMNS};
pub use model::{LinearModel, Regressor};
pub use scaler::RobustScaler;
pub use schema::{PropertyInput, PropertyType, Suburb};
pub use service::{PredictError, Prediction, Predictor};
