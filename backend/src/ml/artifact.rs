//! Model artifact persistence
//!
//! The trainer owns writes, the server owns reads. Replacement is atomic:
//! the new blob lands in a temp file next to the target and is renamed
//! over the old artifact, so a reader never sees a half-written model.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::IrrigationForest;

/// The serialized classifier plus its training metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model: IrrigationForest,
    /// Feature column order the model was trained with.
    pub feature_columns: Vec<String>,
    pub trained_at: DateTime<Utc>,
    /// Held-out accuracy from the training run. Informational only.
    pub test_accuracy: f64,
    /// True when the model was fitted on generated data because the store
    /// held no readings.
    pub synthetic: bool,
}

impl ModelArtifact {
    /// Atomically replace the artifact at `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let bytes = bincode::serialize(self).context("serializing model artifact")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating artifact directory {}", parent.display()))?;
            }
        }

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes).with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }

    /// Load the artifact; a missing or corrupt file is `ModelUnavailable`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path)
            .map_err(|e| AppError::ModelUnavailable(format!("{}: {}", path.display(), e)))?;
        bincode::deserialize(&bytes)
            .map_err(|e| AppError::ModelUnavailable(format!("{}: {}", path.display(), e)))
    }
}
