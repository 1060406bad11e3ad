//! Client for Nominatim-compatible geocoding APIs

use std::time::Duration;

use mediscan_core::Coordinates;
use serde::Deserialize;
use thiserror::Error;

use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a Nominatim `/search` endpoint
#[derive(Clone)]
pub struct GeocodingClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

/// A single place from the search response
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Geocoding request failed: {0}")]
    Request(String),

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),
}

impl From<GeocodeError> for AppError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::NotFound(_) => AppError::BadRequest("Location not found".to_string()),
            other => AppError::ServiceUnavailable(other.to_string()),
        }
    }
}

impl GeocodingClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: user_agent.into(),
        }
    }

    /// Resolve a free-text address to coordinates
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let address = address.trim();
        tracing::debug!(address = address, "Geocoding location");

        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header("User-Agent", &self.user_agent)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Geocoding API request failed");
                GeocodeError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Request(format!("{}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        let coords = parse_places(&body, address)?;
        tracing::debug!(
            address = address,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "Geocoded location"
        );
        Ok(coords)
    }
}

/// Take the first place from a search response body
fn parse_places(body: &str, address: &str) -> Result<Coordinates, GeocodeError> {
    let places: Vec<Place> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse places: {}", e)))?;

    let place = places.first().ok_or_else(|| {
        tracing::warn!(address = address, "Location not found by geocoding API");
        GeocodeError::NotFound(address.to_string())
    })?;

    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|e| GeocodeError::InvalidResponse(format!("Invalid latitude: {}", e)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|e| GeocodeError::InvalidResponse(format!("Invalid longitude: {}", e)))?;

    let coords = Coordinates::new(latitude, longitude);
    if !coords.is_valid() {
        return Err(GeocodeError::InvalidResponse(format!(
            "Coordinates out of range: {}, {}",
            latitude, longitude
        )));
    }

    Ok(coords)
}
