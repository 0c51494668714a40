//! MoodPulse REST API
//!
//! HTTP API layer for MoodPulse, built with Axum.
//!
//! # Endpoints
//!
//! ## Check-ins
//! - `POST /api/v1/checkins` - Submit a check-in
//! - `GET /api/v1/entries?days=N` - Raw check-ins, newest first
//!
//! ## Analysis
//! - `GET /api/v1/analysis?days=N` - Pattern analysis (404 when empty)
//! - `GET /api/v1/snapshot` - Plain-text 7-day support snapshot
//! - `GET /api/v1/vocabulary` - Allowed moods and context tags
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use moodpulse::api::{serve, AppState};
//! use moodpulse::config::Config;
//! use moodpulse::service::MoodService;
//! use moodpulse::storage::SqliteStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store = Arc::new(SqliteStore::open(&config.storage.database_path)?);
//!     let service = Arc::new(MoodService::new(
//!         store,
//!         Arc::new(config.vocabulary.clone()),
//!         config.analysis.clone(),
//!     ));
//!
//!     serve(AppState::new(service, config.api.clone()), &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/checkins", post(routes::checkins::submit_checkin))
        .route("/entries", get(routes::checkins::list_entries))
        .route("/analysis", get(routes::analysis::get_analysis))
        .route("/snapshot", get(routes::snapshot::get_snapshot))
        .route("/vocabulary", get(routes::vocabulary::get_vocabulary));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("MoodPulse API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("MoodPulse API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
