//! Sensor ingestion HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use shared::models::SensorReadingInput;

use crate::services::IngestionService;
use crate::AppState;

/// Receive one sensor reading and append it to the store.
pub async fn receive_sensor_data(
    State(state): State<AppState>,
    Json(input): Json<SensorReadingInput>,
) -> impl IntoResponse {
    let service = IngestionService::new(state.store.clone());

    match service.record(input).await {
        Ok(reading) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "id": reading.id })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
