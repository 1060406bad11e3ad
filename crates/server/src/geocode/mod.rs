//! Location services: address geocoding and nearby-places lookup

pub mod client;
pub mod places;

pub use client::{GeocodeError, GeocodingClient};
pub use places::PlacesClient;
