//! Distance ranking of candidate providers

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::provider::ProviderRecord;

/// Number of providers returned when the caller does not ask for a limit
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// A provider annotated with its distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProvider {
    #[serde(flatten)]
    pub provider: ProviderRecord,
    pub distance_miles: f64,
    pub distance_label: String,
}

impl RankedProvider {
    fn new(provider: &ProviderRecord, distance_miles: f64) -> Self {
        Self {
            provider: provider.clone(),
            distance_miles,
            distance_label: distance_label(distance_miles),
        }
    }
}

/// Human-readable distance, e.g. "2.3 miles away"
pub fn distance_label(distance_miles: f64) -> String {
    format!("{:.1} miles away", distance_miles)
}

/// Rank candidates by distance from `origin`.
///
/// Keeps candidates within `radius_miles`, closest first, at most `limit`
/// of them. If the radius excludes everyone, the closest `limit` candidates
/// are returned regardless of radius. Candidates without usable coordinates
/// are skipped. Equal distances keep their input order.
///
/// A `limit` of 0 is treated as 1, so the result is never empty while any
/// candidate can be ranked.
pub fn rank_by_proximity<'a, I>(
    candidates: I,
    origin: Coordinates,
    radius_miles: f64,
    limit: usize,
) -> Vec<RankedProvider>
where
    I: IntoIterator<Item = &'a ProviderRecord>,
{
    let limit = limit.max(1);

    let mut scored: Vec<RankedProvider> = candidates
        .into_iter()
        .filter_map(|provider| match provider.coordinates {
            Some(coords) if coords.is_valid() => {
                Some(RankedProvider::new(provider, origin.distance_to(&coords)))
            }
            _ => {
                tracing::debug!(
                    provider_id = %provider.id,
                    "Skipping provider without usable coordinates"
                );
                None
            }
        })
        .collect();

    // Vec::sort_by is stable
    scored.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

    let within_radius = scored
        .iter()
        .take_while(|ranked| ranked.distance_miles <= radius_miles)
        .count();

    if within_radius == 0 && !scored.is_empty() {
        tracing::debug!(
            radius_miles = radius_miles,
            candidates = scored.len(),
            "No provider within radius, returning closest available"
        );
    } else {
        scored.truncate(within_radius);
    }

    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinates = Coordinates {
        latitude: 40.0,
        longitude: -75.0,
    };

    fn provider(id: &str, coordinates: Option<Coordinates>) -> ProviderRecord {
        ProviderRecord {
            id: id.to_string(),
            name: format!("Dr. {id}"),
            specialty: "Neurologist".to_string(),
            address: "1 Test St".to_string(),
            coordinates,
            synthetic_location: false,
            rating: Some(4.5),
            review_count: Some(10),
            phone: None,
            email: None,
            availability: None,
        }
    }

    /// Provider `lat_offset` degrees north of the origin
    fn north_of_origin(id: &str, lat_offset: f64) -> ProviderRecord {
        provider(
            id,
            Some(Coordinates::new(ORIGIN.latitude + lat_offset, ORIGIN.longitude)),
        )
    }

    fn ids(ranked: &[RankedProvider]) -> Vec<&str> {
        ranked.iter().map(|r| r.provider.id.as_str()).collect()
    }

    #[test]
    fn test_filters_by_radius_and_sorts() {
        let providers = vec![
            north_of_origin("far", 0.10),  // ~6.9 miles
            north_of_origin("near", 0.01), // ~0.7 miles
            north_of_origin("mid", 0.05),  // ~3.5 miles
        ];

        let ranked = rank_by_proximity(&providers, ORIGIN, 5.0, DEFAULT_RESULT_LIMIT);
        assert_eq!(ids(&ranked), ["near", "mid"]);
        assert_eq!(ranked[0].distance_label, "0.7 miles away");
        assert_eq!(ranked[1].distance_label, "3.5 miles away");
    }

    #[test]
    fn test_empty_radius_falls_back_to_closest() {
        let providers = vec![
            north_of_origin("c", 0.3),
            north_of_origin("a", 0.1),
            north_of_origin("b", 0.2),
        ];

        let ranked = rank_by_proximity(&providers, ORIGIN, 0.01, DEFAULT_RESULT_LIMIT);
        assert_eq!(ids(&ranked), ["a", "b", "c"]);
    }

    #[test]
    fn test_limit_applies_to_fallback_and_filtered_results() {
        let providers: Vec<ProviderRecord> = (1..=8)
            .map(|i| north_of_origin(&format!("p{i}"), f64::from(i) * 0.01))
            .collect();

        let ranked = rank_by_proximity(&providers, ORIGIN, 100.0, 3);
        assert_eq!(ids(&ranked), ["p1", "p2", "p3"]);

        let ranked = rank_by_proximity(&providers, ORIGIN, 0.0001, 3);
        assert_eq!(ids(&ranked), ["p1", "p2", "p3"]);

        let ranked = rank_by_proximity(&providers, ORIGIN, 0.0001, DEFAULT_RESULT_LIMIT);
        assert_eq!(ranked.len(), DEFAULT_RESULT_LIMIT);
    }

    #[test]
    fn test_never_empty_for_nonempty_candidates() {
        let providers = vec![north_of_origin("x", 1.0), north_of_origin("y", 2.0)];

        for radius in [0.0, 0.5, 10.0, 1000.0] {
            for limit in [0, 1, 5] {
                let ranked = rank_by_proximity(&providers, ORIGIN, radius, limit);
                assert!(!ranked.is_empty());
                assert!(ranked.len() <= limit.max(1));
                assert!(
                    ranked
                        .windows(2)
                        .all(|w| w[0].distance_miles <= w[1].distance_miles)
                );
                assert!(ranked.iter().all(|r| r.distance_miles >= 0.0));
            }
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let providers = vec![
            north_of_origin("first", 0.02),
            north_of_origin("second", 0.02),
            provider("origin", Some(ORIGIN)),
        ];

        let ranked = rank_by_proximity(&providers, ORIGIN, 10.0, DEFAULT_RESULT_LIMIT);
        assert_eq!(ids(&ranked), ["origin", "first", "second"]);
        assert_eq!(ranked[0].distance_miles, 0.0);
        assert_eq!(ranked[0].distance_label, "0.0 miles away");
    }

    #[test]
    fn test_unusable_coordinates_are_skipped() {
        let providers = vec![
            provider("missing", None),
            provider("bogus", Some(Coordinates::new(f64::NAN, -75.0))),
            north_of_origin("ok", 0.5),
        ];

        let ranked = rank_by_proximity(&providers, ORIGIN, 1.0, DEFAULT_RESULT_LIMIT);
        assert_eq!(ids(&ranked), ["ok"]);
    }

    #[test]
    fn test_no_candidates() {
        let none: Vec<ProviderRecord> = Vec::new();
        let ranked = rank_by_proximity(&none, ORIGIN, 10.0, DEFAULT_RESULT_LIMIT);
        assert!(ranked.is_empty());

        let providers = vec![provider("missing", None)];
        let ranked = rank_by_proximity(&providers, ORIGIN, 10.0, DEFAULT_RESULT_LIMIT);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_serializes_flat() {
        let providers = vec![north_of_origin("a", 0.01)];
        let ranked = rank_by_proximity(&providers, ORIGIN, 10.0, 1);
        let json = serde_json::to_value(&ranked[0]).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["specialty"], "Neurologist");
        assert_eq!(json["reviewCount"], 10);
        assert_eq!(json["distanceLabel"], "0.7 miles away");
        assert!(json["distanceMiles"].as_f64().unwrap() > 0.69);
    }
}
