//! Random forest ensemble
//!
//! Bootstrap-sampled Gini trees with averaged leaf probabilities. The
//! whole fit is driven by one seeded generator, so a fixed seed yields a
//! bit-for-bit identical forest on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{DecisionTree, LabeledSample, NUM_FEATURES};

/// Leaves stop splitting below this many rows.
const MIN_SAMPLES_SPLIT: usize = 2;

/// Ensemble of randomized decision trees for irrigation classification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IrrigationForest {
    trees: Vec<DecisionTree>,
    n_trees: usize,
    max_depth: usize,
    seed: u64,
}

impl IrrigationForest {
    /// Create an unfitted forest.
    pub fn new(n_trees: usize, max_depth: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_trees,
            max_depth,
            seed: 42,
        }
    }

    /// Set the bootstrap seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit the forest: each tree trains on a bootstrap resample (with
    /// replacement, same size as the input) drawn from the seeded
    /// generator.
    pub fn fit(&mut self, samples: &[LabeledSample]) {
        self.trees.clear();
        if samples.is_empty() {
            return;
        }

        let mut rng = StdRng::seed_from_u64(self.seed);

        for _ in 0..self.n_trees {
            let bootstrap: Vec<LabeledSample> = (0..samples.len())
                .map(|_| samples[rng.gen_range(0..samples.len())].clone())
                .collect();
            self.trees
                .push(DecisionTree::fit(&bootstrap, self.max_depth, MIN_SAMPLES_SPLIT));
        }
    }

    /// Mean positive-class probability across all trees.
    pub fn predict_proba(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .trees
            .iter()
            .map(|tree| tree.predict_proba(features))
            .sum();
        sum / self.trees.len() as f64
    }

    /// Hard decision: averaged probability thresholded at 0.5. This is the
    /// decision the model itself produces; callers must record it as-is.
    pub fn predict(&self, features: &[f64; NUM_FEATURES]) -> bool {
        self.predict_proba(features) >= 0.5
    }

    /// Has `fit` produced any trees?
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Number of fitted trees.
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Fraction of samples whose hard prediction matches the label.
    pub fn accuracy(&self, samples: &[LabeledSample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let correct = samples
            .iter()
            .filter(|s| self.predict(&s.features) == s.label)
            .count();
        correct as f64 / samples.len() as f64
    }
}
