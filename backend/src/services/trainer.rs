//! Batch trainer for the irrigation classifier
//!
//! Reads the stored readings (or synthesizes a dataset when the store is
//! empty), fits the forest, evaluates held-out accuracy, and atomically
//! replaces the model artifact. Run manually by an operator; never invoked
//! by the server.

use std::path::PathBuf;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use shared::models::FEATURE_COLUMNS;

use crate::error::{AppError, AppResult};
use crate::ml::{IrrigationForest, LabeledSample, ModelArtifact};
use crate::store::SensorStore;

/// Samples generated when the store holds no readings.
const SYNTHETIC_SAMPLES: usize = 1000;

/// Below this soil moisture the synthetic label is "irrigate".
const MOISTURE_THRESHOLD: f64 = 30.0;

/// Seed shared by synthetic generation, the split, and the forest.
const TRAIN_SEED: u64 = 42;

/// Held-out fraction of the train/test split.
const TEST_FRACTION: f64 = 0.2;

const N_TREES: usize = 100;
const MAX_DEPTH: usize = 16;

/// Outcome of one training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub total_samples: usize,
    pub train_samples: usize,
    pub test_samples: usize,
    pub accuracy: f64,
    pub synthetic: bool,
}

/// Fits and persists the irrigation model.
pub struct Trainer {
    store: SensorStore,
    artifact_path: PathBuf,
}

impl Trainer {
    /// Create a new Trainer instance
    pub fn new(store: SensorStore, artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            artifact_path: artifact_path.into(),
        }
    }

    /// Run one training pass and replace the artifact.
    ///
    /// An unreadable store surfaces as `StoreUnavailable`; a store whose
    /// rows are all incomplete surfaces as `InsufficientData` and leaves
    /// the old artifact intact.
    pub async fn train(&self) -> AppResult<TrainingReport> {
        let rows = self
            .store
            .feature_rows()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        let (samples, synthetic) = if rows.is_empty() {
            tracing::warn!(
                n = SYNTHETIC_SAMPLES,
                "store holds no readings; training on synthetic data"
            );
            (synthetic_dataset(SYNTHETIC_SAMPLES, TRAIN_SEED), true)
        } else {
            let complete: Vec<LabeledSample> = rows
                .iter()
                .filter_map(|row| row.complete())
                .map(|(features, label)| LabeledSample::new(features, label))
                .collect();
            let dropped = rows.len() - complete.len();
            if dropped > 0 {
                tracing::warn!(dropped, "dropped incomplete readings before training");
            }
            if complete.is_empty() {
                return Err(AppError::InsufficientData(
                    "every stored reading is missing at least one training column".to_string(),
                ));
            }
            (complete, false)
        };

        let (train, test) = stratified_split(&samples, TEST_FRACTION, TRAIN_SEED);
        tracing::info!(
            train = train.len(),
            test = test.len(),
            synthetic,
            "fitting irrigation forest"
        );

        let mut model = IrrigationForest::new(N_TREES, MAX_DEPTH).with_seed(TRAIN_SEED);
        model.fit(&train);

        // Accuracy is informational only; it never gates the save. A tiny
        // dataset can leave the held-out side empty, in which case the
        // training side stands in.
        let accuracy = if test.is_empty() {
            model.accuracy(&train)
        } else {
            model.accuracy(&test)
        };
        tracing::info!("Test accuracy: {:.2}%", accuracy * 100.0);

        let artifact = ModelArtifact {
            model,
            feature_columns: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            trained_at: Utc::now(),
            test_accuracy: accuracy,
            synthetic,
        };
        artifact.save(&self.artifact_path)?;
        tracing::info!(path = %self.artifact_path.display(), "model artifact replaced");

        Ok(TrainingReport {
            total_samples: samples.len(),
            train_samples: train.len(),
            test_samples: test.len(),
            accuracy,
            synthetic,
        })
    }
}

/// Generate the fallback dataset: each feature drawn uniformly from its
/// field range, column by column, from one seeded generator; the label is
/// a pure soil-moisture threshold. A fixed seed reproduces the dataset
/// bit-for-bit.
pub fn synthetic_dataset(n: usize, seed: u64) -> Vec<LabeledSample> {
    let mut rng = StdRng::seed_from_u64(seed);

    let soil_moisture: Vec<f64> = (0..n).map(|_| rng.gen_range(20.0..80.0)).collect();
    let temperature: Vec<f64> = (0..n).map(|_| rng.gen_range(15.0..35.0)).collect();
    let humidity: Vec<f64> = (0..n).map(|_| rng.gen_range(30.0..90.0)).collect();
    let ph_soil: Vec<f64> = (0..n).map(|_| rng.gen_range(5.5..7.5)).collect();
    let nutrient_level: Vec<f64> = (0..n).map(|_| rng.gen_range(20.0..80.0)).collect();

    (0..n)
        .map(|i| {
            let features = [
                soil_moisture[i],
                temperature[i],
                humidity[i],
                ph_soil[i],
                nutrient_level[i],
            ];
            LabeledSample::new(features, soil_moisture[i] < MOISTURE_THRESHOLD)
        })
        .collect()
}

/// 80/20 split preserving class proportions: each class is shuffled and
/// split independently at the same ratio, then the per-class partitions
/// are concatenated.
pub fn stratified_split(
    samples: &[LabeledSample],
    test_fraction: f64,
    seed: u64,
) -> (Vec<LabeledSample>, Vec<LabeledSample>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [true, false] {
        let mut members: Vec<&LabeledSample> =
            samples.iter().filter(|s| s.label == class).collect();
        members.shuffle(&mut rng);

        let n_test = (members.len() as f64 * test_fraction).floor() as usize;
        for (i, sample) in members.into_iter().enumerate() {
            if i < n_test {
                test.push(sample.clone());
            } else {
                train.push(sample.clone());
            }
        }
    }

    (train, test)
}
