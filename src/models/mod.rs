use serde::{Deserialize, Serialize};

/// Fields extracted from a single property detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDetail {
    pub price: String,
    pub description: String,
    pub address: Option<String>,
    pub details: Vec<String>,
    pub features: Vec<String>,
    pub image: String,
}

impl PropertyDetail {
    /// Attach the area the property was found under
    pub fn into_record(self, suburb: impl Into<String>) -> PropertyRecord {
        PropertyRecord {
            suburb: suburb.into(),
            description: self.description,
            address: self.address,
            price: self.price,
            property_details: self.details,
            property_features: self.features,
            image: self.image,
        }
    }
}

/// One row of the scraped output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub suburb: String,
    #[serde(rename = "propert_desc")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub price: String,
    pub property_details: Vec<String>,
    pub property_features: Vec<String>,
    pub image: String,
}

/// Property links grouped by the area they were found under, in scrape order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaLinks {
    entries: Vec<(String, Vec<String>)>,
}

impl AreaLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the links for an area. Searching the same area twice keeps its
    /// original position and replaces the links.
    pub fn insert(&mut self, area: impl Into<String>, links: Vec<String>) {
        let area = area.into();
        match self.entries.iter_mut().find(|(name, _)| *name == area) {
            Some((_, existing)) => *existing = links,
            None => self.entries.push((area, links)),
        }
    }

    pub fn get(&self, area: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == area)
            .map(|(_, links)| links.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(area, links)| (area.as_str(), links.as_slice()))
    }

    pub fn first_area(&self) -> Option<&str> {
        self.entries.first().map(|(area, _)| area.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_links(&self) -> usize {
        self.entries.iter().map(|(_, links)| links.len()).sum()
    }
}
