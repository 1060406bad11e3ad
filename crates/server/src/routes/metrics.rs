//! Prometheus metrics endpoint

use axum::{Extension, extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::AppState;

/// GET /metrics - Render collected metrics in Prometheus text format
pub async fn get(
    State(state): State<AppState>,
    Extension(handle): Extension<PrometheusHandle>,
) -> impl IntoResponse {
    metrics::gauge!("provider_directory_size").set(state.directory.len() as f64);
    handle.render()
}
