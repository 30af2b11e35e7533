use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub places: PlacesConfig,
    pub network: NetworkConfig,
    pub search: SearchConfig,
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlacesConfig {
    pub api_url: String,
    /// Directory API key. Only needed once a lookup is made.
    pub api_key: Option<String>,
}

impl PlacesConfig {
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .context("PLACES_API_KEY must be set (via .env file, environment variable or config.toml)")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub radius_meters: u32,
    /// Keyword sent with every nearby search.
    pub keyword: String,
    /// Appended to free-text queries so they stay within medical places.
    pub text_query_suffix: String,
    pub text_result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_meters: 5000,
            keyword: "doctor clinic hospital medical".to_string(),
            text_query_suffix: "clinic hospital doctor medical".to_string(),
            text_result_limit: 10,
        }
    }
}

/// Where to search when the caller does not supply a position.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LocationConfig {
    pub fallback_lat: f64,
    pub fallback_lng: f64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            fallback_lat: 40.7128,
            fallback_lng: -74.006,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let api_key = std::env::var("PLACES_API_KEY").ok();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clinic-locator");

        let builder = Config::builder()
            // 1. Defaults
            .set_default("places.api_url", "https://maps.googleapis.com/maps/api/place")?
            .set_default("places.api_key", api_key)?
            .set_default("network.request_timeout_secs", 30)?
            .set_default("network.connect_timeout_secs", 10)?
            .set_default("search.radius_meters", 5000)?
            .set_default("search.keyword", "doctor clinic hospital medical")?
            .set_default("search.text_query_suffix", "clinic hospital doctor medical")?
            .set_default("search.text_result_limit", 10)?
            .set_default("location.fallback_lat", 40.7128)?
            .set_default("location.fallback_lng", -74.006)?
            // 2. Local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))
            // 3. User config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))
            // 4. Environment variables (CLINIC__SEARCH__RADIUS_METERS=...)
            .add_source(Environment::with_prefix("CLINIC").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}
