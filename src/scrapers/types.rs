use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.privateproperty.co.za/";
pub const DEFAULT_AREA: &str = "Rosebank and Parktown";

/// Settings for one scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeSettings {
    /// Site root the search bar lives on
    pub base_url: String,
    /// Areas to search, in order
    pub areas: Vec<String>,
    /// Longest wait for an element to appear
    pub element_timeout: Duration,
    /// Attempts per navigation or detail scrape
    pub max_attempts: u32,
    /// Length of one unit in the randomized waits
    pub time_unit: Duration,
}

impl ScrapeSettings {
    pub fn from_config(config: &Config, areas: Vec<String>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            areas,
            element_timeout: Duration::from_secs(config.element_timeout_secs),
            max_attempts: config.max_attempts,
            time_unit: Duration::from_millis(config.time_unit_ms),
        }
    }
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            areas: vec![DEFAULT_AREA.to_string()],
            element_timeout: Duration::from_secs(30),
            max_attempts: 3,
            time_unit: Duration::from_secs(1),
        }
    }
}
