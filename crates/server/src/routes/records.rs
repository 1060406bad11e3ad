//! Patient record handlers

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use crate::db::{NewPatientRecord, PatientRecord};
use crate::error::AppError;

/// GET /api/patient-records - List stored records
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PatientRecord>>, AppError> {
    Ok(Json(state.records.list()?))
}

/// POST /api/patient-records - Store a record
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewPatientRecord>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let record = state.records.append(body.into_record()?)?;

    tracing::info!(record_id = %record.id, "Patient record stored");
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/patient-records/{id} - Read a record
pub async fn read(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<PatientRecord>, AppError> {
    let Path(id) = id?;

    state
        .records
        .get(id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Patient record {} not found", id)))
}
