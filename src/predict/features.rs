//! Encoding of a [`PropertyInput`] into the row layout the model was trained on.

use crate::predict::scaler::RobustScaler;
use crate::predict::schema::{PropertyInput, PropertyType, Suburb};
use serde::Deserialize;

pub const FEATURE_COUNT: usize = 17;

/// Trained column order. Everything that places a value in a row goes
/// through this list.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    FLOOR_SIZE,
    BEDROOMS,
    BATHROOMS,
    LOUNGES,
    "Property_type_Bachelor",
    "Property_type_Cluster",
    "Property_type_Duplex",
    "Property_type_Flat",
    "Property_type_House",
    "Property_type_Loft",
    "Property_type_Penthouse",
    "Property_type_Simplex",
    "Property_type_Small Holding",
    "Property_type_Studio",
    "Property_type_Townhouse",
    "suburb_Modderfontein",
    "suburb_Rosebank and Parktown",
];

pub const FLOOR_SIZE: &str = "Floor_size_(m²)";
pub const BEDROOMS: &str = "Bedrooms";
pub const BATHROOMS: &str = "Bathrooms";
pub const LOUNGES: &str = "Lounges";

pub const PROPERTY_TYPE_SLOTS: usize = 11;
pub const SUBURB_SLOTS: usize = 2;
const PROPERTY_TYPE_OFFSET: usize = 4;
const SUBURB_OFFSET: usize = PROPERTY_TYPE_OFFSET + PROPERTY_TYPE_SLOTS;

/// One encoded request, in [`FEATURE_COLUMNS`] order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow([f64; FEATURE_COUNT]);

impl FeatureRow {
    /// Place named values at their trained positions. Unknown names are
    /// dropped and unset columns stay 0.
    pub fn from_named<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut row = [0.0; FEATURE_COUNT];
        for (name, value) in values {
            if let Some(index) = column_index(name) {
                row[index] = value;
            }
        }
        Self(row)
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        column_index(column).map(|index| self.0[index])
    }

    pub fn property_type_slots(&self) -> &[f64] {
        &self.0[PROPERTY_TYPE_OFFSET..SUBURB_OFFSET]
    }

    pub fn suburb_slots(&self) -> &[f64] {
        &self.0[SUBURB_OFFSET..]
    }
}

pub fn column_index(name: &str) -> Option<usize> {
    FEATURE_COLUMNS.iter().position(|column| *column == name)
}

fn property_type_column(property_type: PropertyType) -> String {
    format!("Property_type_{}", property_type.label())
}

fn suburb_column(suburb: Suburb) -> String {
    format!("suburb_{}", suburb.label())
}

fn one_hot<const N: usize>(offset: usize, column: &str) -> [f64; N] {
    let mut slots = [0.0; N];
    if let Some(position) = FEATURE_COLUMNS[offset..offset + N]
        .iter()
        .position(|c| *c == column)
    {
        slots[position] = 1.0;
    }
    slots
}

/// Indicator slots for a property type; the Apartment baseline has no
/// column and encodes as all zeros
pub fn property_type_encoding(property_type: PropertyType) -> [f64; PROPERTY_TYPE_SLOTS] {
    one_hot(PROPERTY_TYPE_OFFSET, &property_type_column(property_type))
}

/// Indicator slots for a suburb; Fourways is the all-zero baseline
pub fn suburb_encoding(suburb: Suburb) -> [f64; SUBURB_SLOTS] {
    one_hot(SUBURB_OFFSET, &suburb_column(suburb))
}

/// Robust scalers fitted on the training data, one per numeric column
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FeatureScalers {
    #[serde(rename = "Floor_size_(m²)")]
    pub floor_size: RobustScaler,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: RobustScaler,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: RobustScaler,
    #[serde(rename = "Lounges")]
    pub lounges: RobustScaler,
}

/// How the numeric columns are scaled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum NumericScaling {
    /// Fit a fresh scaler on each request's single value. Every scaled
    /// column comes out as 0.
    #[default]
    PerRequest,
    /// Transform with scalers fitted at training time
    Trained(FeatureScalers),
}

impl NumericScaling {
    fn scale(&self, value: f64, trained: impl Fn(&FeatureScalers) -> RobustScaler) -> f64 {
        let scaler = match self {
            Self::PerRequest => RobustScaler::fit(&[value]),
            Self::Trained(scalers) => trained(scalers),
        };
        scaler.transform(value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    scaling: NumericScaling,
}

impl FeatureEncoder {
    pub fn new(scaling: NumericScaling) -> Self {
        Self { scaling }
    }

    pub fn scaling(&self) -> &NumericScaling {
        &self.scaling
    }

    /// log1p + robust scaling for the skewed measurements, robust scaling
    /// for bedrooms, then the one-hot indicators
    pub fn encode(&self, input: &PropertyInput) -> FeatureRow {
        let numeric = [
            (
                FLOOR_SIZE,
                self.scaling.scale(input.floor_size.ln_1p(), |s| s.floor_size),
            ),
            (BEDROOMS, self.scaling.scale(input.bedrooms, |s| s.bedrooms)),
            (
                BATHROOMS,
                self.scaling.scale(input.bathrooms.ln_1p(), |s| s.bathrooms),
            ),
            (LOUNGES, self.scaling.scale(input.lounges.ln_1p(), |s| s.lounges)),
        ];

        let type_columns = FEATURE_COLUMNS[PROPERTY_TYPE_OFFSET..SUBURB_OFFSET].iter().copied();
        let suburb_columns = FEATURE_COLUMNS[SUBURB_OFFSET..].iter().copied();
        let indicators = type_columns
            .zip(property_type_encoding(input.property_type))
            .chain(suburb_columns.zip(suburb_encoding(input.suburb)));

        FeatureRow::from_named(numeric.into_iter().chain(indicators))
    }
}
