//! Irrigation event HTTP handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use shared::models::IrrigationEventInput;
use shared::validation::validate_irrigation_input;

use crate::error::AppError;
use crate::handlers::predict::HistoryQuery;
use crate::AppState;

/// Record a manual or automatic irrigation run.
pub async fn record_irrigation_event(
    State(state): State<AppState>,
    Json(input): Json<IrrigationEventInput>,
) -> impl IntoResponse {
    if let Err(e) = validate_irrigation_input(&input) {
        return AppError::Validation {
            field: e.field.to_string(),
            message: e.message.to_string(),
        }
        .into_response();
    }

    let event = input.into_new_event(Utc::now());
    match state.store.append_event(&event).await {
        Ok(id) => (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ok", "id": id })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// List recent irrigation events, newest first.
pub async fn list_irrigation_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    match state.store.recent_events(limit).await {
        Ok(events) => (
            StatusCode::OK,
            Json(serde_json::json!({ "events": events })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
