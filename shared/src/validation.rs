//! Validation utilities for the FarmTech irrigation pipeline
//!
//! Ingestion rejects partial or malformed readings up front so the stored
//! feature matrix stays dense; nothing downstream tolerates NaN or infinite
//! sensor values.

use thiserror::Error;

use crate::models::{IrrigationEventInput, SensorReadingInput};

/// A rejected field and the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validate that every numeric field of a sensor reading is a finite number.
pub fn validate_sensor_input(input: &SensorReadingInput) -> Result<(), FieldError> {
    for (field, value) in input.numeric_fields() {
        validate_finite(field, value)?;
    }
    Ok(())
}

/// Validate an irrigation event payload: finite numbers, non-negative
/// duration and water volume.
pub fn validate_irrigation_input(input: &IrrigationEventInput) -> Result<(), FieldError> {
    for (field, value) in input.numeric_fields() {
        validate_finite(field, value)?;
    }
    if input.duration_minutes < 0.0 {
        return Err(FieldError::new(
            "duration_minutes",
            "duration cannot be negative",
        ));
    }
    if input.water_amount_ml < 0.0 {
        return Err(FieldError::new(
            "water_amount_ml",
            "water amount cannot be negative",
        ));
    }
    Ok(())
}

/// Reject NaN and infinite values for the named field.
pub fn validate_finite(field: &'static str, value: f64) -> Result<(), FieldError> {
    if value.is_nan() {
        return Err(FieldError::new(field, "value must not be NaN"));
    }
    if value.is_infinite() {
        return Err(FieldError::new(field, "value must be finite"));
    }
    Ok(())
}
