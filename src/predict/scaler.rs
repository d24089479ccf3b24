use serde::{Deserialize, Serialize};

/// Median/IQR scaling, robust to outliers.
///
/// A zero interquartile range scales by 1 so a constant input maps to 0
/// instead of dividing by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobustScaler {
    pub center: f64,
    pub scale: f64,
}

impl RobustScaler {
    pub fn new(center: f64, scale: f64) -> Self {
        Self { center, scale }
    }

    /// Fit on samples using the 25th and 75th percentiles (linear interpolation)
    pub fn fit(samples: &[f64]) -> Self {
        let mut sorted: Vec<f64> = samples.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return Self::new(0.0, 1.0);
        }
        sorted.sort_by(f64::total_cmp);

        let center = quantile(&sorted, 0.5);
        let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
        let scale = if iqr.abs() < 10.0 * f64::EPSILON { 1.0 } else { iqr };

        Self::new(center, scale)
    }

    pub fn transform(&self, value: f64) -> f64 {
        (value - self.center) / self.scale
    }

    pub fn inverse_transform(&self, value: f64) -> f64 {
        value * self.scale + self.center
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
