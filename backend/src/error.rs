//! Error handling for the FarmTech irrigation pipeline
//!
//! Provides consistent JSON error responses across the API surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Ingestion errors
    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    // Prediction errors
    #[error("No sensor data available")]
    NoData,

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    // Trainer errors
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    // Storage errors
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NoData => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NO_DATA".to_string(),
                    message: "No sensor data available".to_string(),
                    field: None,
                },
            ),
            AppError::ModelUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "MODEL_UNAVAILABLE".to_string(),
                    message: format!("Model unavailable: {}", msg),
                    field: None,
                },
            ),
            AppError::InsufficientData(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_DATA".to_string(),
                    message: format!("Insufficient training data: {}", msg),
                    field: None,
                },
            ),
            AppError::StoreUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "STORE_UNAVAILABLE".to_string(),
                    message: format!("Store unavailable: {}", msg),
                    field: None,
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;
