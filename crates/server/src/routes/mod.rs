pub mod health;
pub mod metrics;
mod places;
mod records;
mod recommendation;
mod specialists;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

/// Build API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/find-doctors", post(specialists::find_doctors))
        .route("/specialties", get(specialists::specialties))
        .route("/find-specialist", get(places::find_specialist))
        .route("/doctor-recommendation", post(recommendation::recommend))
        .route("/care-advice", get(recommendation::care_advice))
        .route("/patient-records", get(records::list).post(records::create))
        .route("/patient-records/{id}", get(records::read))
}
