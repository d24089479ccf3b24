use crate::scrapers::types::DEFAULT_BASE_URL;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "property-scout.toml";
const ENV_PREFIX: &str = "SCOUT_";

/// Application configuration: defaults, then `property-scout.toml`, then
/// `SCOUT_*` environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub log_level: String,

    /// Port the prediction API listens on
    pub port: u16,
    pub model_path: PathBuf,
    pub target_scaler_path: PathBuf,
    /// Training-time scalers for the numeric features; when unset each
    /// request fits its own
    pub feature_scalers_path: Option<PathBuf>,

    pub base_url: String,
    pub headless: bool,
    /// Milliseconds per unit of the randomized scrape delays
    pub time_unit_ms: u64,
    pub element_timeout_secs: u64,
    pub max_attempts: u32,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 8000,
            model_path: PathBuf::from("trained_model.json"),
            target_scaler_path: PathBuf::from("price_robust_scaler.json"),
            feature_scalers_path: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            time_unit_ms: 1000,
            element_timeout_secs: 30,
            max_attempts: 3,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }
}
