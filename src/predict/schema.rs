use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Property types the model knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Flat,
    House,
    Penthouse,
    Simplex,
    Cluster,
    Townhouse,
    Loft,
    Studio,
    Duplex,
    Bachelor,
    #[serde(rename = "Small Holding")]
    SmallHolding,
}

impl PropertyType {
    pub const ALL: [PropertyType; 12] = [
        Self::Apartment,
        Self::Flat,
        Self::House,
        Self::Penthouse,
        Self::Simplex,
        Self::Cluster,
        Self::Townhouse,
        Self::Loft,
        Self::Studio,
        Self::Duplex,
        Self::Bachelor,
        Self::SmallHolding,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Flat => "Flat",
            Self::House => "House",
            Self::Penthouse => "Penthouse",
            Self::Simplex => "Simplex",
            Self::Cluster => "Cluster",
            Self::Townhouse => "Townhouse",
            Self::Loft => "Loft",
            Self::Studio => "Studio",
            Self::Duplex => "Duplex",
            Self::Bachelor => "Bachelor",
            Self::SmallHolding => "Small Holding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suburb {
    #[serde(rename = "Rosebank and Parktown")]
    RosebankAndParktown,
    #[serde(rename = "Fourways, Sunninghill and Lonehill")]
    FourwaysSunninghillAndLonehill,
    Modderfontein,
}

impl Suburb {
    pub const ALL: [Suburb; 3] = [
        Self::RosebankAndParktown,
        Self::FourwaysSunninghillAndLonehill,
        Self::Modderfontein,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RosebankAndParktown => "Rosebank and Parktown",
            Self::FourwaysSunninghillAndLonehill => "Fourways, Sunninghill and Lonehill",
            Self::Modderfontein => "Modderfontein",
        }
    }
}

/// Body of a prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    #[serde(rename = "Floor_Size")]
    pub floor_size: f64,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: f64,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: f64,
    #[serde(rename = "Lounges")]
    pub lounges: f64,
    #[serde(rename = "Property_Type")]
    pub property_type: PropertyType,
    #[serde(rename = "Suburb")]
    pub suburb: Suburb,
}

#[derive(Debug, Error, PartialEq)]
#[error("{field} must be a non-negative number, got {value}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
}

impl PropertyInput {
    /// Reject negative or non-finite measurements
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("Floor_Size", self.floor_size),
            ("Bedrooms", self.bedrooms),
            ("Bathrooms", self.bathrooms),
            ("Lounges", self.lounges),
        ];
        match fields
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((field, value)) => Err(ValidationError { field, value }),
            None => Ok(()),
        }
    }
}
