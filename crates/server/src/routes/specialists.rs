//! Specialist search handlers

use axum::{
    Extension, Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use mediscan_core::{
    Coordinates, RankedProvider, SpecialistQuery, resolve_specialties, validate_radius,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::AppState;
use crate::error::AppError;
use crate::geocode::GeocodingClient;

const MISSING_FIELDS: &str = "Condition and location are required";
const INVALID_LOCATION: &str = "Location must include numeric latitude and longitude";

/// Request body for specialist search.
///
/// Fields are kept loose so shape problems surface as `{error}` responses
/// rather than extractor rejections.
#[derive(Debug, Deserialize)]
pub struct FindDoctorsRequest {
    #[serde(default)]
    condition: Option<JsonValue>,
    #[serde(default)]
    location: Option<JsonValue>,
    #[serde(default)]
    radius: Option<JsonValue>,
}

/// Query parameters for specialty lookup
#[derive(Debug, Deserialize)]
pub struct ConditionParams {
    condition: Option<String>,
}

/// Response body for specialty lookup
#[derive(Serialize)]
pub struct SpecialtiesResponse {
    condition: String,
    specialties: Vec<&'static str>,
}

/// Where the search should be centered
enum Origin {
    Coordinates(Coordinates),
    Address(String),
}

fn parse_origin(location: Option<&JsonValue>) -> Result<Origin, AppError> {
    match location {
        None | Some(JsonValue::Null) => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        Some(JsonValue::Object(obj)) => {
            let latitude = obj.get("latitude").and_then(JsonValue::as_f64);
            let longitude = obj.get("longitude").and_then(JsonValue::as_f64);
            match (latitude, longitude) {
                (Some(lat), Some(lon)) => Ok(Origin::Coordinates(Coordinates::new(lat, lon))),
                _ => Err(AppError::BadRequest(INVALID_LOCATION.to_string())),
            }
        }
        Some(JsonValue::String(address)) if !address.trim().is_empty() => {
            Ok(Origin::Address(address.trim().to_string()))
        }
        Some(JsonValue::String(_)) => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        Some(_) => Err(AppError::BadRequest(INVALID_LOCATION.to_string())),
    }
}

fn parse_radius(radius: Option<&JsonValue>) -> Result<Option<f64>, AppError> {
    match radius {
        None | Some(JsonValue::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            AppError::BadRequest("Radius must be a number of miles".to_string())
        }),
    }
}

fn parse_condition(condition: Option<&JsonValue>) -> Result<&str, AppError> {
    match condition {
        Some(JsonValue::String(c)) if !c.trim().is_empty() => Ok(c),
        Some(JsonValue::String(_)) | Some(JsonValue::Null) | None => {
            Err(AppError::BadRequest(MISSING_FIELDS.to_string()))
        }
        Some(_) => Err(AppError::BadRequest("Condition must be a string".to_string())),
    }
}

/// POST /api/find-doctors - Rank nearby providers for a condition
///
/// `location` is either `{latitude, longitude}` or a free-text address,
/// which is geocoded when a geocoder is configured.
pub async fn find_doctors(
    State(state): State<AppState>,
    Extension(geocoder): Extension<Option<GeocodingClient>>,
    payload: Result<Json<FindDoctorsRequest>, JsonRejection>,
) -> Result<Json<Vec<RankedProvider>>, AppError> {
    let Json(body) = payload?;

    let condition = parse_condition(body.condition.as_ref())?;
    let radius = validate_radius(parse_radius(body.radius.as_ref())?)?;
    let origin = match parse_origin(body.location.as_ref())? {
        Origin::Coordinates(coords) => coords,
        Origin::Address(address) => {
            let geocoder = geocoder.ok_or_else(|| {
                AppError::BadRequest(format!(
                    "{} (address lookup is not enabled)",
                    INVALID_LOCATION
                ))
            })?;
            geocoder.geocode(&address).await?
        }
    };

    let query = SpecialistQuery::new(condition, origin, Some(radius))?;
    tracing::info!(
        condition = %query.condition,
        radius_miles = query.radius_miles,
        "Specialist search"
    );

    let ranked = state.directory.find_specialists(&query, state.result_limit);
    metrics::counter!("specialist_searches_total").increment(1);
    Ok(Json(ranked))
}

/// GET /api/specialties?condition= - Specialties relevant to a condition
pub async fn specialties(
    params: Result<Query<ConditionParams>, QueryRejection>,
) -> Result<Json<SpecialtiesResponse>, AppError> {
    let Query(params) = params?;
    let condition = params
        .condition
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Condition is required".to_string()))?;

    let specialties = resolve_specialties(&condition).into_iter().collect();
    Ok(Json(SpecialtiesResponse {
        condition,
        specialties,
    }))
}
