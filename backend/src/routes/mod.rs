//! Route definitions for the FarmTech irrigation pipeline

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness (public, no dependency checks)
        .route("/health", get(handlers::health_check))
        // Sensor ingestion
        .route("/sensor-data", post(handlers::receive_sensor_data))
        // Prediction
        .route("/predict", get(handlers::predict_irrigation))
        .route("/predictions", get(handlers::list_predictions))
        // Irrigation events
        .route("/irrigation-events", post(handlers::record_irrigation_event))
        .route("/irrigation-history", get(handlers::list_irrigation_history))
}
