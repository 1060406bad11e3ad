//! Static provider directory

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::TriageError;
use crate::geo::Coordinates;

/// Dataset compiled into the binary, used when no dataset path is configured
const BUNDLED_DATASET: &str = include_str!("../data/providers.json");

/// Default anchor for synthetic coordinates (lower Manhattan)
pub const DEFAULT_ANCHOR: Coordinates = Coordinates {
    latitude: 40.7128,
    longitude: -74.0060,
};

/// Maximum offset, in degrees, of a synthetic location from the anchor
const SYNTHETIC_SPREAD_DEGREES: f64 = 0.15;

/// A healthcare provider listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub address: String,

    /// `None` when the dataset carried unusable coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Coordinates were generated at load time, not geocoded
    #[serde(default)]
    pub synthetic_location: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

/// Record shape accepted from a dataset file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProviderRecord {
    #[serde(default)]
    id: Option<JsonValue>,
    name: String,
    specialty: String,
    address: String,
    #[serde(default)]
    coordinates: Option<JsonValue>,
    #[serde(default)]
    latitude: Option<JsonValue>,
    #[serde(default)]
    longitude: Option<JsonValue>,
    #[serde(default)]
    rating: Option<JsonValue>,
    #[serde(default, alias = "reviews")]
    review_count: Option<JsonValue>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    availability: Option<String>,
}

/// How a raw record's location was resolved
#[derive(Debug, PartialEq)]
enum RawLocation {
    Present(Coordinates),
    Absent,
    Malformed,
}

impl RawProviderRecord {
    fn location(&self) -> RawLocation {
        let (lat, lon) = match &self.coordinates {
            Some(JsonValue::Null) | None => (self.latitude.as_ref(), self.longitude.as_ref()),
            Some(obj) if obj.is_object() => (obj.get("latitude"), obj.get("longitude")),
            Some(_) => return RawLocation::Malformed,
        };

        match (non_null(lat), non_null(lon)) {
            (None, None) => RawLocation::Absent,
            (Some(lat), Some(lon)) => match (lat.as_f64(), lon.as_f64()) {
                (Some(lat), Some(lon)) => {
                    let coords = Coordinates::new(lat, lon);
                    if coords.is_valid() {
                        RawLocation::Present(coords)
                    } else {
                        RawLocation::Malformed
                    }
                }
                _ => RawLocation::Malformed,
            },
            _ => RawLocation::Malformed,
        }
    }

    fn into_record(self, position: usize, anchor: Coordinates) -> ProviderRecord {
        let id = match &self.id {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(JsonValue::Number(n)) => n.to_string(),
            _ => (position + 1).to_string(),
        };

        let (coordinates, synthetic_location) = match self.location() {
            RawLocation::Present(coords) => (Some(coords), false),
            RawLocation::Absent => (
                Some(synthetic_coordinates(
                    anchor,
                    &format!("{}|{}", self.name, self.address),
                )),
                true,
            ),
            RawLocation::Malformed => {
                tracing::warn!(
                    provider_id = %id,
                    name = %self.name,
                    "Provider has malformed coordinates, excluding it from proximity ranking"
                );
                (None, false)
            }
        };

        let rating = display_number(&id, "rating", self.rating.as_ref())
            .and_then(|v| v.as_f64())
            .filter(|r| r.is_finite());
        let review_count = display_number(&id, "reviewCount", self.review_count.as_ref())
            .and_then(|v| v.as_u64())
            .and_then(|n| u32::try_from(n).ok());

        ProviderRecord {
            id,
            name: self.name,
            specialty: self.specialty,
            address: self.address,
            coordinates,
            synthetic_location,
            rating,
            review_count,
            phone: self.phone,
            email: self.email,
            availability: self.availability,
        }
    }
}

fn non_null(value: Option<&JsonValue>) -> Option<&JsonValue> {
    value.filter(|v| !v.is_null())
}

/// Display-only numeric field; anything that is not a number is dropped
fn display_number<'a>(
    provider_id: &str,
    field: &str,
    value: Option<&'a JsonValue>,
) -> Option<&'a JsonValue> {
    let value = non_null(value)?;
    if !value.is_number() {
        tracing::warn!(
            provider_id = %provider_id,
            field = field,
            "Ignoring non-numeric provider field"
        );
        return None;
    }
    Some(value)
}

/// 64-bit FNV-1a hash
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.iter().fold(OFFSET_BASIS, |hash, &byte| {
        (hash ^ u64::from(byte)).wrapping_mul(PRIME)
    })
}

/// Deterministic placeholder location near `anchor`, derived from `seed`.
///
/// The same seed always yields the same point, so synthetic locations are
/// stable across restarts.
fn synthetic_coordinates(anchor: Coordinates, seed: &str) -> Coordinates {
    let hash = fnv1a(seed.as_bytes());
    let unit = |bits: u64| (bits & 0xFFFF) as f64 / f64::from(u16::MAX) * 2.0 - 1.0;

    Coordinates {
        latitude: (anchor.latitude + unit(hash) * SYNTHETIC_SPREAD_DEGREES).clamp(-90.0, 90.0),
        longitude: (anchor.longitude + unit(hash >> 16) * SYNTHETIC_SPREAD_DEGREES)
            .clamp(-180.0, 180.0),
    }
}

/// Read-only provider directory, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct ProviderDirectory {
    providers: Vec<ProviderRecord>,
}

impl ProviderDirectory {
    /// Build a directory from already-resolved records
    pub fn from_records(providers: Vec<ProviderRecord>) -> Self {
        Self { providers }
    }

    /// Parse a dataset (JSON array of provider objects).
    ///
    /// Records without coordinates get a synthetic location near `anchor`.
    pub fn from_json(json: &str, anchor: Coordinates) -> Result<Self, TriageError> {
        if !anchor.is_valid() {
            return Err(TriageError::InvalidInput(format!(
                "Invalid directory anchor: {}, {}",
                anchor.latitude, anchor.longitude
            )));
        }

        let raw: Vec<RawProviderRecord> = serde_json::from_str(json)
            .map_err(|e| TriageError::Dataset(format!("Failed to parse providers: {}", e)))?;

        let providers: Vec<ProviderRecord> = raw
            .into_iter()
            .enumerate()
            .map(|(position, record)| record.into_record(position, anchor))
            .collect();

        let synthetic = providers.iter().filter(|p| p.synthetic_location).count();
        tracing::info!(
            providers = providers.len(),
            synthetic_locations = synthetic,
            "Provider directory loaded"
        );

        Ok(Self { providers })
    }

    /// Load a dataset file from disk
    pub fn from_json_file(path: &Path, anchor: Coordinates) -> Result<Self, TriageError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            TriageError::Dataset(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json, anchor)
    }

    /// The dataset compiled into the binary
    pub fn bundled(anchor: Coordinates) -> Result<Self, TriageError> {
        Self::from_json(BUNDLED_DATASET, anchor)
    }

    /// All providers, in dataset order
    pub fn all(&self) -> &[ProviderRecord] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_loads() {
        let directory = ProviderDirectory::bundled(DEFAULT_ANCHOR).unwrap();
        assert!(!directory.is_empty());
        assert!(directory.all().iter().all(|p| p.coordinates.is_some()));
    }

    #[test]
    fn test_order_is_stable() {
        let first = ProviderDirectory::bundled(DEFAULT_ANCHOR).unwrap();
        let second = ProviderDirectory::bundled(DEFAULT_ANCHOR).unwrap();
        assert_eq!(first.all(), second.all());
        assert_eq!(first.all()[0].id, "1");
    }

    #[test]
    fn test_coordinate_shapes() {
        let json = r#"[
            {"id": 7, "name": "Dr. Nested", "specialty": "Cardiologist", "address": "1 A St",
             "coordinates": {"latitude": 40.0, "longitude": -75.0}},
            {"id": "flat-1", "name": "Dr. Flat", "specialty": "Neurologist", "address": "2 B St",
             "latitude": 41.0, "longitude": -74.0, "reviews": 12, "rating": 4.5},
            {"name": "Dr. Missing", "specialty": "Dermatologist", "address": "3 C St"}
        ]"#;

        let directory = ProviderDirectory::from_json(json, DEFAULT_ANCHOR).unwrap();
        let providers = directory.all();

        assert_eq!(providers[0].id, "7");
        assert_eq!(providers[0].coordinates, Some(Coordinates::new(40.0, -75.0)));
        assert!(!providers[0].synthetic_location);

        assert_eq!(providers[1].id, "flat-1");
        assert_eq!(providers[1].coordinates, Some(Coordinates::new(41.0, -74.0)));
        assert_eq!(providers[1].review_count, Some(12));

        // Positional id, synthetic location near the anchor
        assert_eq!(providers[2].id, "3");
        assert!(providers[2].synthetic_location);
        let coords = providers[2].coordinates.unwrap();
        assert!((coords.latitude - DEFAULT_ANCHOR.latitude).abs() <= SYNTHETIC_SPREAD_DEGREES);
        assert!((coords.longitude - DEFAULT_ANCHOR.longitude).abs() <= SYNTHETIC_SPREAD_DEGREES);
    }

    #[test]
    fn test_malformed_coordinates_are_dropped() {
        let json = r#"[
            {"name": "Dr. Text", "specialty": "Cardiologist", "address": "1 A St",
             "latitude": "north", "longitude": -75.0},
            {"name": "Dr. Half", "specialty": "Cardiologist", "address": "2 A St",
             "latitude": 40.0},
            {"name": "Dr. Range", "specialty": "Cardiologist", "address": "3 A St",
             "coordinates": {"latitude": 120.0, "longitude": 0.0}}
        ]"#;

        let directory = ProviderDirectory::from_json(json, DEFAULT_ANCHOR).unwrap();
        assert_eq!(directory.len(), 3);
        assert!(directory.all().iter().all(|p| p.coordinates.is_none()));
        assert!(directory.all().iter().all(|p| !p.synthetic_location));
    }

    #[test]
    fn test_bad_display_fields_do_not_fail_load() {
        let json = r#"[
            {"name": "Dr. Text", "specialty": "Cardiologist", "address": "1 A St",
             "rating": "excellent", "reviews": 12.5},
            {"name": "Dr. Negative", "specialty": "Cardiologist", "address": "2 A St",
             "rating": 4.8, "reviewCount": -3},
            {"name": "Dr. Plain", "specialty": "Cardiologist", "address": "3 A St",
             "rating": 4, "reviewCount": 7}
        ]"#;

        let directory = ProviderDirectory::from_json(json, DEFAULT_ANCHOR).unwrap();
        let providers = directory.all();
        assert_eq!(providers.len(), 3);

        assert_eq!(providers[0].rating, None);
        assert_eq!(providers[0].review_count, None);
        assert_eq!(providers[1].rating, Some(4.8));
        assert_eq!(providers[1].review_count, None);
        assert_eq!(providers[2].rating, Some(4.0));
        assert_eq!(providers[2].review_count, Some(7));
    }

    #[test]
    fn test_synthetic_coordinates_are_deterministic() {
        let a = synthetic_coordinates(DEFAULT_ANCHOR, "Dr. Smith|1 Main St");
        let b = synthetic_coordinates(DEFAULT_ANCHOR, "Dr. Smith|1 Main St");
        let c = synthetic_coordinates(DEFAULT_ANCHOR, "Dr. Jones|1 Main St");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is_valid());
    }

    #[test]
    fn test_invalid_dataset_is_an_error() {
        let err = ProviderDirectory::from_json("{\"not\": \"an array\"}", DEFAULT_ANCHOR)
            .unwrap_err();
        assert!(matches!(err, TriageError::Dataset(_)));

        let err = ProviderDirectory::from_json(r#"[{"name": "No specialty"}]"#, DEFAULT_ANCHOR)
            .unwrap_err();
        assert!(matches!(err, TriageError::Dataset(_)));
    }

    #[test]
    fn test_invalid_anchor_is_rejected() {
        let err = ProviderDirectory::from_json("[]", Coordinates::new(f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, TriageError::InvalidInput(_)));
    }
}
