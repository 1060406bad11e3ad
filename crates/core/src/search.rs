//! Validated specialist search combining matching and ranking

use crate::error::TriageError;
use crate::geo::Coordinates;
use crate::provider::ProviderDirectory;
use crate::ranking::{RankedProvider, rank_by_proximity};

/// Search radius used when the caller does not supply one
pub const DEFAULT_RADIUS_MILES: f64 = 10.0;

/// A validated "find nearby specialist" request
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistQuery {
    pub condition: String,
    pub origin: Coordinates,
    pub radius_miles: f64,
}

impl SpecialistQuery {
    /// Validate raw request fields into a query
    pub fn new(
        condition: &str,
        origin: Coordinates,
        radius_miles: Option<f64>,
    ) -> Result<Self, TriageError> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(TriageError::InvalidInput(
                "Condition and location are required".to_string(),
            ));
        }

        if !origin.is_valid() {
            return Err(TriageError::InvalidInput(format!(
                "Invalid location: latitude {} / longitude {} out of range",
                origin.latitude, origin.longitude
            )));
        }

        let radius_miles = validate_radius(radius_miles)?;

        Ok(Self {
            condition: condition.to_string(),
            origin,
            radius_miles,
        })
    }
}

/// Resolve an optional radius, defaulting to [`DEFAULT_RADIUS_MILES`].
///
/// Rejects negative and non-finite values.
pub fn validate_radius(radius_miles: Option<f64>) -> Result<f64, TriageError> {
    let radius_miles = radius_miles.unwrap_or(DEFAULT_RADIUS_MILES);
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        return Err(TriageError::InvalidInput(format!(
            "Radius must be a non-negative number of miles, got {}",
            radius_miles
        )));
    }
    Ok(radius_miles)
}

impl ProviderDirectory {
    /// Match providers to the query's condition and rank them by distance.
    ///
    /// If none of the matched providers has usable coordinates, the whole
    /// directory is ranked instead.
    pub fn find_specialists(&self, query: &SpecialistQuery, limit: usize) -> Vec<RankedProvider> {
        let candidates = self.match_by_specialty(&query.condition);
        let mut ranked = rank_by_proximity(candidates, query.origin, query.radius_miles, limit);

        if ranked.is_empty() {
            tracing::debug!(
                condition = %query.condition,
                "No matched provider could be ranked, widening to all providers"
            );
            ranked = rank_by_proximity(self.all(), query.origin, query.radius_miles, limit);
        }

        tracing::debug!(
            condition = %query.condition,
            radius_miles = query.radius_miles,
            results = ranked.len(),
            "Specialist search complete"
        );

        ranked
    }
}
