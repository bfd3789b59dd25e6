//! On-demand irrigation prediction service

use std::sync::Arc;

use chrono::Utc;

use shared::models::{recommendation_for, NewPrediction, PredictionResult};

use crate::error::{AppError, AppResult};
use crate::ml::ModelArtifact;
use crate::store::SensorStore;

/// Scores the latest reading against the loaded model artifact.
///
/// The artifact is loaded once at process start and handed in here; it is
/// never mutated afterwards, so concurrent predictions share it freely.
/// A service constructed without an artifact stays up but answers every
/// prediction with `ModelUnavailable`.
#[derive(Clone)]
pub struct PredictorService {
    store: SensorStore,
    model: Option<Arc<ModelArtifact>>,
}

impl PredictorService {
    /// Create a new PredictorService instance
    pub fn new(store: SensorStore, model: Option<Arc<ModelArtifact>>) -> Self {
        Self { store, model }
    }

    /// Score the most recent reading, persist the prediction, and return
    /// the recommendation.
    pub async fn predict(&self) -> AppResult<PredictionResult> {
        let artifact = self
            .model
            .as_ref()
            .ok_or_else(|| AppError::ModelUnavailable("no model artifact loaded".to_string()))?;

        let reading = self.store.latest_reading().await?.ok_or(AppError::NoData)?;

        // Feature order must match training exactly.
        let features = reading.features();
        let probability = artifact.model.predict_proba(&features);
        let decision = artifact.model.predict(&features);
        let recommendation = recommendation_for(decision);

        tracing::info!(probability, decision, "prediction generated");

        self.store
            .append_prediction(&NewPrediction {
                timestamp: Utc::now(),
                irrigation_probability: probability,
                irrigation_decision: decision,
                recommendation: recommendation.to_string(),
                actual_irrigation: None,
            })
            .await?;

        Ok(PredictionResult {
            probability,
            decision,
            recommendation: recommendation.to_string(),
        })
    }
}
