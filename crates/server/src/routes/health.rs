//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    providers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// GET /health - Report whether the provider directory is usable
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    let providers = state.directory.len();

    if providers == 0 {
        tracing::error!("Health check failed: provider directory is empty");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy".to_string(),
                providers,
                reason: Some("Provider directory is empty".to_string()),
            }),
        );
    }

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            providers,
            reason: None,
        }),
    )
}
