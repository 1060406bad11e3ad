//! Server configuration

use std::path::PathBuf;

use mediscan_core::Coordinates;
use mediscan_core::provider::DEFAULT_ANCHOR;
use mediscan_core::ranking::DEFAULT_RESULT_LIMIT;

const DEFAULT_GEOCODER_USER_AGENT: &str = "mediscan-ai/0.1 (specialist finder)";

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    /// Provider dataset on disk; the bundled dataset is used when unset
    pub providers_path: Option<PathBuf>,
    /// Center for synthetic provider locations
    pub directory_anchor: Coordinates,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    pub result_limit: usize,
    /// Nominatim-compatible base URL; geocoding is disabled when unset
    pub geocoder_url: Option<String>,
    pub geocoder_user_agent: String,
    /// Places search endpoint; nearby-places lookup is disabled when unset
    pub places_url: Option<String>,
    pub places_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            providers_path: std::env::var("PROVIDERS_PATH").ok().map(PathBuf::from),
            directory_anchor: std::env::var("DIRECTORY_ANCHOR")
                .ok()
                .and_then(|v| parse_anchor(&v))
                .unwrap_or(DEFAULT_ANCHOR),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|rps| *rps > 0)
                .unwrap_or(100),
            result_limit: std::env::var("RESULT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(DEFAULT_RESULT_LIMIT),
            geocoder_url: std::env::var("GEOCODER_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            geocoder_user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.into()),
            places_url: std::env::var("PLACES_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            places_api_key: std::env::var("PLACES_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Parse "lat,lon"
fn parse_anchor(value: &str) -> Option<Coordinates> {
    let (lat, lon) = value.split_once(',')?;
    let coords = Coordinates::new(lat.trim().parse().ok()?, lon.trim().parse().ok()?);
    coords.is_valid().then_some(coords)
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
