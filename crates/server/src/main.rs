//! mediscan-server: specialist finder HTTP server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediscan_core::ProviderDirectory;
use mediscan_server::AppState;
use mediscan_server::config::Config;
use mediscan_server::db::InMemoryPatientRecords;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();

    // Load provider directory once; it is shared read-only afterwards
    let directory = match &config.providers_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading provider dataset");
            ProviderDirectory::from_json_file(path, config.directory_anchor)
        }
        None => {
            tracing::info!("PROVIDERS_PATH not set, using bundled provider dataset");
            ProviderDirectory::bundled(config.directory_anchor)
        }
    }
    .expect("Failed to load provider directory");

    // Log startup info
    if config.geocoder_url.is_some() {
        tracing::info!("Geocoder configured, address search enabled");
    } else {
        tracing::warn!("GEOCODER_URL not set, searches require latitude/longitude");
    }
    tracing::info!("Rate limiting: {} requests/second", config.rate_limit_rps);

    // Build application
    let state = AppState::new(directory, Arc::new(InMemoryPatientRecords::new()), &config);
    let app = mediscan_server::build_app(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_address.parse().expect("Invalid bind address");
    tracing::info!("Starting MediScan server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server shutdown complete");
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
