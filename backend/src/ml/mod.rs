//! Machine learning primitives for irrigation prediction
//!
//! A small, self-contained ensemble of Gini decision trees. Training is
//! fully deterministic for a fixed seed: bootstrap sampling order, split
//! search, and vote aggregation all run in a fixed order.

mod artifact;
mod forest;
mod tree;

pub use artifact::ModelArtifact;
pub use forest::IrrigationForest;
pub use tree::DecisionTree;

/// Number of feature columns the model consumes.
pub const NUM_FEATURES: usize = 5;

/// A labeled training sample: one feature row and its irrigation label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub features: [f64; NUM_FEATURES],
    pub label: bool,
}

impl LabeledSample {
    pub fn new(features: [f64; NUM_FEATURES], label: bool) -> Self {
        Self { features, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold_samples() -> Vec<LabeledSample> {
        // Label depends only on the first feature being below 30.
        (0..100)
            .map(|i| {
                let soil = i as f64;
                LabeledSample::new([soil, 20.0, 60.0, 6.5, 50.0], soil < 30.0)
            })
            .collect()
    }

    #[test]
    fn test_tree_learns_threshold() {
        let samples = threshold_samples();
        let tree = DecisionTree::fit(&samples, 8, 2);

        assert!(tree.predict_proba(&[10.0, 20.0, 60.0, 6.5, 50.0]) > 0.5);
        assert!(tree.predict_proba(&[70.0, 20.0, 60.0, 6.5, 50.0]) < 0.5);
    }

    #[test]
    fn test_tree_pure_node_is_leaf() {
        let samples: Vec<LabeledSample> = (0..10)
            .map(|i| LabeledSample::new([i as f64, 0.0, 0.0, 0.0, 0.0], true))
            .collect();
        let tree = DecisionTree::fit(&samples, 8, 2);

        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.predict_proba(&[3.0, 0.0, 0.0, 0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_forest_learns_threshold() {
        let samples = threshold_samples();
        let mut forest = IrrigationForest::new(25, 8);
        forest.fit(&samples);

        assert!(forest.predict(&[5.0, 20.0, 60.0, 6.5, 50.0]));
        assert!(!forest.predict(&[75.0, 20.0, 60.0, 6.5, 50.0]));
    }

    #[test]
    fn test_forest_probability_bounds() {
        let samples = threshold_samples();
        let mut forest = IrrigationForest::new(10, 6);
        forest.fit(&samples);

        for soil in [0.0, 15.0, 29.5, 30.5, 50.0, 99.0] {
            let p = forest.predict_proba(&[soil, 20.0, 60.0, 6.5, 50.0]);
            assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
        }
    }

    #[test]
    fn test_forest_deterministic_for_fixed_seed() {
        let samples = threshold_samples();

        let mut a = IrrigationForest::new(20, 8).with_seed(42);
        a.fit(&samples);
        let mut b = IrrigationForest::new(20, 8).with_seed(42);
        b.fit(&samples);

        for soil in [1.0, 25.0, 29.9, 30.1, 55.0, 80.0] {
            let features = [soil, 20.0, 60.0, 6.5, 50.0];
            assert_eq!(a.predict_proba(&features), b.predict_proba(&features));
            assert_eq!(a.predict(&features), b.predict(&features));
        }
    }

    #[test]
    fn test_forest_decision_matches_probability_threshold() {
        let samples = threshold_samples();
        let mut forest = IrrigationForest::new(15, 8);
        forest.fit(&samples);

        for soil in [0.0, 20.0, 28.0, 32.0, 60.0, 95.0] {
            let features = [soil, 20.0, 60.0, 6.5, 50.0];
            let p = forest.predict_proba(&features);
            assert_eq!(forest.predict(&features), p >= 0.5);
        }
    }
}
