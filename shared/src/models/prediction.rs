//! Prediction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recommendation text for a positive irrigation decision.
pub const RECOMMEND_START: &str = "start irrigation";

/// Recommendation text for a negative irrigation decision.
pub const RECOMMEND_STOP: &str = "stop irrigation";

/// Map a model decision to its recommendation text.
pub fn recommendation_for(decision: bool) -> &'static str {
    if decision {
        RECOMMEND_START
    } else {
        RECOMMEND_STOP
    }
}

/// One scored inference, as stored.
///
/// `actual_irrigation` is filled in later by a feedback step and may
/// remain unset indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub irrigation_probability: f64,
    pub irrigation_decision: bool,
    pub recommendation: String,
    pub actual_irrigation: Option<bool>,
}

/// A prediction ready to be appended to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPrediction {
    pub timestamp: DateTime<Utc>,
    pub irrigation_probability: f64,
    pub irrigation_decision: bool,
    pub recommendation: String,
    pub actual_irrigation: Option<bool>,
}

/// Result returned to the caller of a prediction request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    pub probability: f64,
    pub decision: bool,
    pub recommendation: String,
}
