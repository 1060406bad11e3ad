//! mediscan-server library crate
//!
//! Exposes `build_app`, `AppState` and `config` for integration tests.
//! The actual binary entrypoint is in `main.rs`.

pub mod config;
pub mod db;
pub mod error;
pub mod geocode;
mod middleware;
mod routes;

use std::sync::Arc;

use axum::{Extension, Router, middleware as axum_mw, routing::get};
use mediscan_core::ProviderDirectory;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use db::PatientRecordRepository;
use geocode::{GeocodingClient, PlacesClient};

/// Shared, read-mostly state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<ProviderDirectory>,
    pub records: Arc<dyn PatientRecordRepository>,
    pub result_limit: usize,
}

impl AppState {
    pub fn new(
        directory: ProviderDirectory,
        records: Arc<dyn PatientRecordRepository>,
        config: &Config,
    ) -> Self {
        Self {
            directory: Arc::new(directory),
            records,
            result_limit: config.result_limit,
        }
    }
}

/// Build the full application router with all routes and middleware.
///
/// Extracted from `main()` so integration tests can construct the app
/// without binding to a TCP port.
pub fn build_app(state: AppState, config: &Config) -> Router {
    // Create rate limiter
    let rate_limiter = middleware::create_rate_limiter(config.rate_limit_rps);

    // Create geocoding client (None if GEOCODER_URL not set)
    let geocoder: Option<GeocodingClient> = config
        .geocoder_url
        .as_ref()
        .map(|url| GeocodingClient::new(url.clone(), config.geocoder_user_agent.clone()));

    // Create places client (None if PLACES_URL not set)
    let places: Option<PlacesClient> = config
        .places_url
        .as_ref()
        .map(|url| PlacesClient::new(url.clone(), config.places_api_key.clone()));

    // Rate-limited API routes
    let api_routes = Router::new()
        .nest("/api", routes::api_routes())
        .layer(Extension(geocoder))
        .layer(Extension(places))
        .layer(axum_mw::from_fn(middleware::rate_limit_middleware))
        .layer(Extension(rate_limiter));

    // Install Prometheus metrics recorder.
    // Use build_recorder() + set_global_recorder() so that repeated calls
    // (e.g. in integration tests) don't panic; the second install is
    // silently ignored and we still get a valid handle for /metrics.
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let prometheus_handle = recorder.handle();
    let _ = metrics::set_global_recorder(recorder);

    // Operational routes
    let public_routes = Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .layer(Extension(prometheus_handle));

    // Build CORS layer
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Build application
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state)
        .layer(axum_mw::from_fn(middleware::audit_middleware))
        .layer(axum_mw::from_fn(middleware::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_mw::from_fn(middleware::metrics_middleware))
}
