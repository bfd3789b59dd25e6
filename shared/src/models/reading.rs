//! Sensor reading models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feature columns consumed by the irrigation model, in training order.
///
/// The predictor must project features in exactly this order; a mismatch
/// silently produces wrong predictions.
pub const FEATURE_COLUMNS: [&str; 5] = [
    "soil_moisture",
    "temperature",
    "humidity",
    "ph_soil",
    "nutrient_level",
];

/// One timestamped snapshot of sensor values, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReading {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph_soil: f64,
    pub nutrient_level: f64,
    pub rainfall: f64,
    pub irrigation_active: bool,
    pub system_error: bool,
}

impl SensorReading {
    /// Project the model feature vector, in [`FEATURE_COLUMNS`] order.
    pub fn features(&self) -> [f64; 5] {
        [
            self.soil_moisture,
            self.temperature,
            self.humidity,
            self.ph_soil,
            self.nutrient_level,
        ]
    }
}

/// Payload accepted by ingestion.
///
/// The timestamp is always assigned by the server at insertion time;
/// callers cannot supply one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorReadingInput {
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph_soil: f64,
    pub nutrient_level: f64,
    pub rainfall: f64,
    pub irrigation_active: bool,
    pub system_error: bool,
}

impl SensorReadingInput {
    /// All numeric fields with their names, for validation.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 6] {
        [
            ("soil_moisture", self.soil_moisture),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
            ("ph_soil", self.ph_soil),
            ("nutrient_level", self.nutrient_level),
            ("rainfall", self.rainfall),
        ]
    }

    /// Stamp the payload with a server-assigned timestamp.
    pub fn into_new_reading(self, timestamp: DateTime<Utc>) -> NewSensorReading {
        NewSensorReading {
            timestamp,
            soil_moisture: self.soil_moisture,
            temperature: self.temperature,
            humidity: self.humidity,
            ph_soil: self.ph_soil,
            nutrient_level: self.nutrient_level,
            rainfall: self.rainfall,
            irrigation_active: self.irrigation_active,
            system_error: self.system_error,
        }
    }
}

/// A validated reading ready to be appended to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSensorReading {
    pub timestamp: DateTime<Utc>,
    pub soil_moisture: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph_soil: f64,
    pub nutrient_level: f64,
    pub rainfall: f64,
    pub irrigation_active: bool,
    pub system_error: bool,
}

impl NewSensorReading {
    /// The stored reading this row becomes under the given id.
    pub fn into_reading(self, id: i64) -> SensorReading {
        SensorReading {
            id,
            timestamp: self.timestamp,
            soil_moisture: self.soil_moisture,
            temperature: self.temperature,
            humidity: self.humidity,
            ph_soil: self.ph_soil,
            nutrient_level: self.nutrient_level,
            rainfall: self.rainfall,
            irrigation_active: self.irrigation_active,
            system_error: self.system_error,
        }
    }
}
