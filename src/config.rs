/// Deployment configuration loader - parses scraper.toml
///
/// Separates the polled region, zoom level, API key, proxy, and poll
/// interval from code, so a deployment can re-point the scraper without
/// recompiling the service. The configuration is immutable for the life of
/// the process; every poll cycle reads the same values.

use serde::Deserialize;
use std::fs;
use std::time::Duration;

/// Geographic rectangle polled each cycle, WGS84 corners.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionConfig {
    pub lower_left_latitude: f64,
    pub lower_left_longitude: f64,
    pub upper_right_latitude: f64,
    pub upper_right_longitude: f64,
}

/// Traffic service and polling parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Tile zoom level embedded in the request path.
    pub zoom: u8,

    /// API key segment of the request path.
    pub api_key: String,

    /// Outbound HTTP proxy host. Requests go direct when unset; the proxy
    /// port is fixed at 8080.
    #[serde(default)]
    pub proxy_host: Option<String>,

    /// Seconds to hold between cycles, successful or not.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    120
}

impl ServiceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    pub region: RegionConfig,
    pub service: ServiceConfig,
}

/// Loads the scraper configuration from scraper.toml.
///
/// # Panics
/// Panics if the configuration file is missing, malformed, or contains
/// invalid data. This is intentional — the service cannot operate without
/// a region and an API key.
///
/// # File Location
/// Expects `scraper.toml` in the current working directory (project root
/// when running via `cargo run`).
pub fn load_config() -> ScraperConfig {
    let config_path = "scraper.toml";

    let contents = fs::read_to_string(config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path, e));

    toml::from_str(&contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", config_path, e))
}
