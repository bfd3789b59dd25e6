//! Prediction HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::services::PredictorService;
use crate::AppState;

/// Score the latest reading and return the irrigation recommendation.
pub async fn predict_irrigation(State(state): State<AppState>) -> impl IntoResponse {
    let service = PredictorService::new(state.store.clone(), state.model.clone());

    match service.predict().await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// List recent predictions, newest first.
pub async fn list_predictions(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    match state.store.recent_predictions(limit).await {
        Ok(predictions) => (
            StatusCode::OK,
            Json(serde_json::json!({ "predictions": predictions })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
