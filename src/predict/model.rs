use crate::predict::artifacts::{read_json, ArtifactError};
use crate::predict::features::{FeatureRow, FEATURE_COLUMNS, FEATURE_COUNT};
use serde::Deserialize;
use std::path::Path;

/// A trained model mapping an encoded row to a scaled log-price
pub trait Regressor: Send + Sync {
    fn predict(&self, row: &FeatureRow) -> f64;
}

/// Linear model exported from training as coefficients plus intercept
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

#[derive(Debug, Deserialize)]
struct LinearModelFile {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

impl LinearModel {
    pub fn new(coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        Self::from_file(read_json(path)?)
    }

    fn from_file(file: LinearModelFile) -> Result<Self, ArtifactError> {
        if let Some(names) = &file.feature_names {
            if names.len() != FEATURE_COUNT {
                return Err(ArtifactError::FeatureCount {
                    expected: FEATURE_COUNT,
                    found: names.len(),
                });
            }
            if let Some((position, (found, expected))) = names
                .iter()
                .zip(FEATURE_COLUMNS)
                .enumerate()
                .find(|(_, (found, expected))| found.as_str() != *expected)
            {
                return Err(ArtifactError::FeatureOrder {
                    position,
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }

        let found = file.coefficients.len();
        let coefficients: [f64; FEATURE_COUNT] =
            file.coefficients
                .try_into()
                .map_err(|_| ArtifactError::FeatureCount {
                    expected: FEATURE_COUNT,
                    found,
                })?;

        Ok(Self::new(coefficients, file.intercept))
    }
}

impl Regressor for LinearModel {
    fn predict(&self, row: &FeatureRow) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.values())
                .map(|(weight, value)| weight * value)
                .sum::<f64>()
    }
}
