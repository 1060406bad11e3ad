//! Nearby healthcare places handler

use axum::{
    Extension, Json,
    extract::{Query, rejection::QueryRejection},
};
use mediscan_core::Coordinates;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::geocode::PlacesClient;
use crate::geocode::places::DEFAULT_CATEGORIES;

/// Query parameters for nearby places
#[derive(Debug, Deserialize)]
pub struct PlacesParams {
    lat: Option<String>,
    lon: Option<String>,
    category: Option<String>,
}

fn parse_point(lat: Option<&str>, lon: Option<&str>) -> Result<Coordinates, AppError> {
    let (lat, lon) = match (
        lat.map(str::trim).filter(|v| !v.is_empty()),
        lon.map(str::trim).filter(|v| !v.is_empty()),
    ) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::BadRequest(
                "Latitude and longitude are required".to_string(),
            ));
        }
    };

    let invalid = || AppError::BadRequest("Latitude and longitude must be valid coordinates".into());
    let coords = Coordinates::new(
        lat.parse().map_err(|_| invalid())?,
        lon.parse().map_err(|_| invalid())?,
    );
    if !coords.is_valid() {
        return Err(invalid());
    }
    Ok(coords)
}

/// GET /api/find-specialist?lat=&lon=&category= - Live nearby-places lookup
pub async fn find_specialist(
    Extension(places): Extension<Option<PlacesClient>>,
    params: Result<Query<PlacesParams>, QueryRejection>,
) -> Result<Json<JsonValue>, AppError> {
    let Query(params) = params?;
    let origin = parse_point(params.lat.as_deref(), params.lon.as_deref())?;

    let places = places.ok_or_else(|| {
        AppError::ServiceUnavailable("Nearby places lookup is not enabled".to_string())
    })?;

    let categories = params.category.as_deref().unwrap_or(DEFAULT_CATEGORIES);
    let result = places.nearby(origin, categories).await?;
    metrics::counter!("places_lookups_total").increment(1);
    Ok(Json(result))
}
