//! Client for Geoapify-compatible nearby-places APIs

use std::time::Duration;

use mediscan_core::Coordinates;
use serde_json::Value as JsonValue;

use super::client::GeocodeError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Search circle around the origin, in meters
const SEARCH_RADIUS_METERS: u32 = 5000;

/// Maximum number of places requested
const PLACES_LIMIT: u32 = 20;

/// Categories searched when the caller does not name any
pub const DEFAULT_CATEGORIES: &str = "healthcare.hospital,healthcare.clinic,healthcare.doctor";

/// Client for a places search endpoint
#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlacesClient {
    /// Create a client for the places endpoint at `base_url`
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Healthcare places near `origin`, as returned by the upstream API
    pub async fn nearby(
        &self,
        origin: Coordinates,
        categories: &str,
    ) -> Result<JsonValue, GeocodeError> {
        tracing::debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            categories = categories,
            "Looking up nearby places"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&places_query(origin, categories, self.api_key.as_deref()))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Places API request failed");
                GeocodeError::Request(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Request(format!("{}: {}", status, body)));
        }

        response
            .json::<JsonValue>()
            .await
            .map_err(|e| GeocodeError::InvalidResponse(format!("Failed to parse places: {}", e)))
    }
}

/// Query parameters for a places search around `origin`
fn places_query(
    origin: Coordinates,
    categories: &str,
    api_key: Option<&str>,
) -> Vec<(&'static str, String)> {
    let (lat, lon) = (origin.latitude, origin.longitude);
    let categories = match categories.trim() {
        "" => DEFAULT_CATEGORIES,
        c => c,
    };

    let mut query = vec![
        ("categories", categories.to_string()),
        (
            "filter",
            format!("circle:{},{},{}", lon, lat, SEARCH_RADIUS_METERS),
        ),
        ("bias", format!("proximity:{},{}", lon, lat)),
        ("limit", PLACES_LIMIT.to_string()),
    ];
    if let Some(key) = api_key {
        query.push(("apiKey", key.to_string()));
    }
    query
}
