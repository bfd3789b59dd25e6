//! FarmTech Irrigation Pipeline - Backend
//!
//! Sensor ingestion, a batch trainer for the irrigation classifier, and
//! the predictor service that scores the latest reading against the
//! persisted model artifact.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod ml;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;

use ml::ModelArtifact;
use store::SensorStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SensorStore,
    /// Loaded once at startup; `None` leaves the service degraded but up.
    pub model: Option<Arc<ModelArtifact>>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "FarmTech API is running",
        "endpoints": ["/health", "/sensor-data", "/predict"],
    }))
}
