use crate::config::Config;
use crate::predict::artifacts::{read_json, ArtifactError};
use crate::predict::features::{FeatureEncoder, FeatureRow, FeatureScalers, NumericScaling};
use crate::predict::model::{LinearModel, Regressor};
use crate::predict::scaler::RobustScaler;
use crate::predict::schema::PropertyInput;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_price: f64,
}

#[derive(Error, Debug, PartialEq)]
pub enum PredictError {
    #[error("model produced a non-finite price ({0})")]
    NonFinite(f64),
}

/// Trained model plus the transforms around it. Immutable once built.
pub struct Predictor {
    model: Box<dyn Regressor>,
    target_scaler: RobustScaler,
    encoder: FeatureEncoder,
}

impl Predictor {
    pub fn new(
        model: impl Regressor + 'static,
        target_scaler: RobustScaler,
        encoder: FeatureEncoder,
    ) -> Self {
        Self {
            model: Box::new(model),
            target_scaler,
            encoder,
        }
    }

    /// Load the model, target scaler and optional feature scalers named in
    /// the config
    pub fn from_config(config: &Config) -> Result<Self, ArtifactError> {
        let model = LinearModel::load(&config.model_path)?;
        let target_scaler: RobustScaler = read_json(&config.target_scaler_path)?;

        let scaling = match &config.feature_scalers_path {
            Some(path) => {
                info!(path = %path.display(), "Using training-time feature scalers");
                NumericScaling::Trained(read_json::<FeatureScalers>(path)?)
            }
            None => NumericScaling::PerRequest,
        };

        info!(
            model = %config.model_path.display(),
            target_scaler = %config.target_scaler_path.display(),
            "Loaded trained artifacts"
        );
        Ok(Self::new(model, target_scaler, FeatureEncoder::new(scaling)))
    }

    pub fn encode(&self, input: &PropertyInput) -> FeatureRow {
        self.encoder.encode(input)
    }

    /// Undo the training-time target transform: robust scaling, then log1p
    pub fn decode_target(&self, raw: f64) -> f64 {
        self.target_scaler.inverse_transform(raw).exp_m1()
    }

    pub fn predict(&self, input: &PropertyInput) -> Result<Prediction, PredictError> {
        let row = self.encode(input);
        let raw = self.model.predict(&row);
        let price = self.decode_target(raw);
        debug!(raw, price, "Prediction");

        if !price.is_finite() {
            return Err(PredictError::NonFinite(price));
        }
        Ok(Prediction {
            predicted_price: price,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::predict::features::FEATURE_COUNT;
    use crate::predict::schema::{PropertyType, Suburb};

    /// Small linear model that only weighs House and Rosebank
    pub(crate) fn sample_predictor() -> Predictor {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[8] = 0.4; // Property_type_House
        coefficients[16] = 0.3; // suburb_Rosebank and Parktown
        Predictor::new(
            LinearModel::new(coefficients, -0.2),
            RobustScaler::new(14.2, 0.9),
            FeatureEncoder::default(),
        )
    }

    fn house_in_rosebank() -> PropertyInput {
        PropertyInput {
            floor_size: 85.0,
            bedrooms: 3.0,
            bathrooms: 2.0,
            lounges: 1.0,
            property_type: PropertyType::House,
            suburb: Suburb::RosebankAndParktown,
        }
    }

    #[test]
    fn house_in_rosebank_gets_a_finite_price() {
        let predictor = sample_predictor();
        let prediction = predictor.predict(&house_in_rosebank()).unwrap();

        let expected = (0.5_f64 * 0.9 + 14.2).exp_m1();
        assert!(prediction.predicted_price.is_finite());
        assert!((prediction.predicted_price - expected).abs() < 1e-6);
    }

    #[test]
    fn decoding_inverts_the_target_transform() {
        let predictor = sample_predictor();
        let scaler = RobustScaler::new(14.2, 0.9);

        for price in [450_000.0, 1_250_000.0, 8_900_000.0] {
            let encoded = scaler.transform(f64::ln_1p(price));
            let decoded = predictor.decode_target(encoded);
            assert!((decoded - price).abs() / price < 1e-9);
        }
    }

    #[test]
    fn non_finite_predictions_are_errors() {
        let predictor = Predictor::new(
            LinearModel::new([0.0; FEATURE_COUNT], 1e6),
            RobustScaler::new(0.0, 1.0),
            FeatureEncoder::default(),
        );
        assert!(matches!(
            predictor.predict(&house_in_rosebank()),
            Err(PredictError::NonFinite(_))
        ));
    }

    #[test]
    fn loads_artifacts_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        let scaler_path = dir.path().join("scaler.json");
        let features_path = dir.path().join("features.json");

        let coefficients = vec![0.1; FEATURE_COUNT];
        std::fs::write(
            &model_path,
            serde_json::json!({ "coefficients": coefficients, "intercept": 0.0 }).to_string(),
        )
        .unwrap();
        std::fs::write(&scaler_path, r#"{"center": 14.0, "scale": 1.0}"#).unwrap();
        let scaler = r#"{"center": 0.0, "scale": 1.0}"#;
        std::fs::write(
            &features_path,
            format!(
                r#"{{"Floor_size_(m²)": {scaler}, "Bedrooms": {scaler}, "Bathrooms": {scaler}, "Lounges": {scaler}}}"#
            ),
        )
        .unwrap();

        let config = Config {
            model_path,
            target_scaler_path: scaler_path,
            feature_scalers_path: Some(features_path),
            ..Config::default()
        };
        let predictor = Predictor::from_config(&config).unwrap();

        assert!(matches!(
            predictor.encoder.scaling(),
            NumericScaling::Trained(_)
        ));
        let row = predictor.encode(&house_in_rosebank());
        assert_eq!(row.values()[1], 3.0);
    }

    #[test]
    fn missing_model_file_is_reported() {
        let config = Config {
            model_path: "does/not/exist.json".into(),
            ..Config::default()
        };
        assert!(matches!(
            Predictor::from_config(&config),
            Err(ArtifactError::Read { .. })
        ));
    }
}
