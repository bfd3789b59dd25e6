//! Gini decision tree
//!
//! Binary classification tree over dense feature rows. Splits minimize
//! weighted Gini impurity; leaves carry the positive-class fraction of the
//! training rows that reached them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{LabeledSample, NUM_FEATURES};

/// One tree node: an internal split or a leaf probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Node {
    Leaf {
        /// Fraction of positive training rows at this leaf.
        probability: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A fitted decision tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    root: Node,
}

impl DecisionTree {
    /// Fit a tree on the given samples.
    ///
    /// `max_depth` bounds recursion; nodes with fewer than
    /// `min_samples_split` rows, or with a single class, become leaves.
    pub fn fit(samples: &[LabeledSample], max_depth: usize, min_samples_split: usize) -> Self {
        let indices: Vec<usize> = (0..samples.len()).collect();
        Self {
            root: build_node(samples, &indices, max_depth, min_samples_split),
        }
    }

    /// Positive-class probability for one feature row.
    pub fn predict_proba(&self, features: &[f64; NUM_FEATURES]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { probability } => return *probability,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if features[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Total node count, splits and leaves.
    pub fn n_nodes(&self) -> usize {
        count_nodes(&self.root)
    }
}

fn count_nodes(node: &Node) -> usize {
    match node {
        Node::Leaf { .. } => 1,
        Node::Split { left, right, .. } => 1 + count_nodes(left) + count_nodes(right),
    }
}

fn count_positives(samples: &[LabeledSample], indices: &[usize]) -> usize {
    indices.iter().filter(|&&i| samples[i].label).count()
}

fn build_node(
    samples: &[LabeledSample],
    indices: &[usize],
    depth_left: usize,
    min_samples_split: usize,
) -> Node {
    let positives = count_positives(samples, indices);
    let probability = positives as f64 / indices.len() as f64;

    // Pure, too small, or out of depth: stop here.
    if positives == 0
        || positives == indices.len()
        || indices.len() < min_samples_split
        || depth_left == 0
    {
        return Node::Leaf { probability };
    }

    let Some((feature, threshold)) = best_split(samples, indices) else {
        return Node::Leaf { probability };
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .iter()
        .partition(|&&i| samples[i].features[feature] <= threshold);

    // A threshold chosen between two distinct values always leaves both
    // sides non-empty; guard anyway so a degenerate split cannot recurse.
    if left_idx.is_empty() || right_idx.is_empty() {
        return Node::Leaf { probability };
    }

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(
            samples,
            &left_idx,
            depth_left - 1,
            min_samples_split,
        )),
        right: Box::new(build_node(
            samples,
            &right_idx,
            depth_left - 1,
            min_samples_split,
        )),
    }
}

/// Exhaustive split search: for every feature, sort the rows by value and
/// evaluate the weighted Gini impurity at each boundary between distinct
/// values. Returns the (feature, midpoint threshold) with the lowest
/// impurity, or None when no feature has two distinct values.
fn best_split(samples: &[LabeledSample], indices: &[usize]) -> Option<(usize, f64)> {
    let total = indices.len() as f64;
    let total_pos = count_positives(samples, indices) as f64;

    let mut best: Option<(usize, f64, f64)> = None;

    for feature in 0..NUM_FEATURES {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| {
            samples[a].features[feature]
                .partial_cmp(&samples[b].features[feature])
                .unwrap_or(Ordering::Equal)
        });

        let mut left_n = 0.0;
        let mut left_pos = 0.0;

        for window in 0..order.len() - 1 {
            let idx = order[window];
            left_n += 1.0;
            if samples[idx].label {
                left_pos += 1.0;
            }

            let value = samples[idx].features[feature];
            let next = samples[order[window + 1]].features[feature];
            if value == next {
                continue;
            }

            let right_n = total - left_n;
            let right_pos = total_pos - left_pos;
            let impurity =
                (left_n * gini(left_pos, left_n) + right_n * gini(right_pos, right_n)) / total;

            let better = match best {
                Some((_, _, best_impurity)) => impurity < best_impurity,
                None => true,
            };
            if better {
                best = Some((feature, (value + next) / 2.0, impurity));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}

fn gini(pos: f64, n: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }
    let p = pos / n;
    2.0 * p * (1.0 - p)
}
