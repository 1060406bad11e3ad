//! Doctor recommendation and care advice handlers

use axum::{
    Json,
    extract::{
        Query,
        rejection::{JsonRejection, QueryRejection},
    },
};
use mediscan_core::{DiagnosisInput, DoctorRecommendation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Query parameters for care advice
#[derive(Debug, Deserialize)]
pub struct AdviceParams {
    condition: Option<String>,
}

/// Response body for care advice
#[derive(Serialize)]
pub struct AdviceResponse {
    condition: String,
    recommendations: Vec<&'static str>,
}

/// POST /api/doctor-recommendation - Single specialist referral for a diagnosis
pub async fn recommend(
    payload: Result<Json<DiagnosisInput>, JsonRejection>,
) -> Result<Json<DoctorRecommendation>, AppError> {
    let Json(diagnosis) = payload?;
    let recommendation = diagnosis.recommend();

    tracing::info!(
        conditions = diagnosis.conditions.len(),
        care_level = ?diagnosis.care_level,
        specialty = ?recommendation.specialty,
        urgency = ?recommendation.urgency,
        "Doctor recommendation"
    );

    metrics::counter!(
        "doctor_recommendations_total",
        "urgency" => format!("{:?}", recommendation.urgency).to_lowercase()
    )
    .increment(1);

    Ok(Json(recommendation))
}

/// GET /api/care-advice?condition= - Self-care advice for a condition
pub async fn care_advice(
    params: Result<Query<AdviceParams>, QueryRejection>,
) -> Result<Json<AdviceResponse>, AppError> {
    let Query(params) = params?;
    let condition = params
        .condition
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Condition is required".to_string()))?;

    let recommendations = mediscan_core::care_advice(&condition);
    Ok(Json(AdviceResponse {
        condition,
        recommendations,
    }))
}
