//! Irrigation event models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What caused an irrigation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TriggerType {
    Manual,
    Automatic,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Manual => "manual",
            TriggerType::Automatic => "automatic",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TriggerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manual" => Ok(TriggerType::Manual),
            "automatic" => Ok(TriggerType::Automatic),
            other => Err(format!("unknown trigger type: {}", other)),
        }
    }
}

/// One recorded irrigation run, as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationEvent {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub duration_minutes: f64,
    pub trigger_type: TriggerType,
    pub soil_moisture_before: f64,
    pub soil_moisture_after: f64,
    pub water_amount_ml: f64,
}

/// Payload for recording an irrigation run; the timestamp is assigned by
/// the server at insertion time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationEventInput {
    pub duration_minutes: f64,
    pub trigger_type: TriggerType,
    pub soil_moisture_before: f64,
    pub soil_moisture_after: f64,
    pub water_amount_ml: f64,
}

impl IrrigationEventInput {
    /// All numeric fields with their names, for validation.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 4] {
        [
            ("duration_minutes", self.duration_minutes),
            ("soil_moisture_before", self.soil_moisture_before),
            ("soil_moisture_after", self.soil_moisture_after),
            ("water_amount_ml", self.water_amount_ml),
        ]
    }

    /// Stamp the payload with a server-assigned timestamp.
    pub fn into_new_event(self, timestamp: DateTime<Utc>) -> NewIrrigationEvent {
        NewIrrigationEvent {
            timestamp,
            duration_minutes: self.duration_minutes,
            trigger_type: self.trigger_type,
            soil_moisture_before: self.soil_moisture_before,
            soil_moisture_after: self.soil_moisture_after,
            water_amount_ml: self.water_amount_ml,
        }
    }
}

/// A validated irrigation event ready to be appended to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewIrrigationEvent {
    pub timestamp: DateTime<Utc>,
    pub duration_minutes: f64,
    pub trigger_type: TriggerType,
    pub soil_moisture_before: f64,
    pub soil_moisture_after: f64,
    pub water_amount_ml: f64,
}
