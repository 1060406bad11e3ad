//! mediscan-core: specialist recommendation and geo-matching
//!
//! Maps free-text condition names and diagnosis output to specialties,
//! ranks providers from a static directory by distance, and picks a
//! single specialist referral for a diagnosis.

pub mod advice;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod provider;
pub mod ranking;
pub mod recommendation;
pub mod search;
pub mod taxonomy;

pub use advice::care_advice;
pub use error::TriageError;
pub use geo::{Coordinates, EARTH_RADIUS_MILES, distance_miles};
pub use matcher::match_by_specialty;
pub use provider::{ProviderDirectory, ProviderRecord};
pub use ranking::{DEFAULT_RESULT_LIMIT, RankedProvider, rank_by_proximity};
pub use recommendation::{
    CareLevel, ConditionLikelihood, DiagnosisInput, DoctorRecommendation, MedicalSpecialty,
    Urgency, recommend_specialist,
};
pub use search::{DEFAULT_RADIUS_MILES, SpecialistQuery, validate_radius};
pub use taxonomy::{PRIMARY_CARE, resolve_specialties};
