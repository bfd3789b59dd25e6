//! Sensor data ingestion service

use chrono::Utc;

use shared::models::{SensorReading, SensorReadingInput};
use shared::validation::validate_sensor_input;

use crate::error::{AppError, AppResult};
use crate::store::SensorStore;

/// Validates and appends incoming sensor readings.
#[derive(Clone)]
pub struct IngestionService {
    store: SensorStore,
}

impl IngestionService {
    /// Create a new IngestionService instance
    pub fn new(store: SensorStore) -> Self {
        Self { store }
    }

    /// Record one reading.
    ///
    /// All numeric fields must be finite; the timestamp is assigned here,
    /// at insertion time, regardless of what the caller observed. On any
    /// failure nothing is written.
    pub async fn record(&self, input: SensorReadingInput) -> AppResult<SensorReading> {
        validate_sensor_input(&input).map_err(|e| AppError::Validation {
            field: e.field.to_string(),
            message: e.message.to_string(),
        })?;

        let reading = input.into_new_reading(Utc::now());
        let id = self.store.append_reading(&reading).await?;

        tracing::debug!(id, "sensor reading stored");
        Ok(reading.into_reading(id))
    }
}
