//! Flat-array gradient-boosted tree ensemble.
//!
//! Each tree stores its nodes in parallel arrays. Node `i` is a leaf
//! when `left[i] < 0`, otherwise it splits on `row[feature[i]] <
//! threshold[i]` and both children sit at higher indices than `i`. That
//! ordering is enforced by [`GbtModel::validate`], so a walk always
//! moves forward through the arrays and terminates.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only objective this build knows how to score.
pub const LOGISTIC_OBJECTIVE: &str = "binary:logistic";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported objective '{0}', expected {LOGISTIC_OBJECTIVE}")]
    UnsupportedObjective(String),
    #[error("model declares zero features")]
    ZeroFeatures,
    #[error("model has no trees")]
    EmptyEnsemble,
    #[error("base_score {0} is not finite")]
    NonFiniteBaseScore(f64),
    #[error("tree {tree}: {reason}")]
    MalformedTree { tree: usize, reason: String },
    #[error("feature row has {got} values but the model expects {expected}")]
    RowWidth { expected: usize, got: usize },
}

/// One regression tree in node-parallel layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    /// Split feature index per node. Unused for leaves.
    pub feature: Vec<usize>,
    /// Split threshold per node. Unused for leaves.
    pub threshold: Vec<f64>,
    /// Left child index per node, `-1` marks a leaf.
    pub left: Vec<i32>,
    /// Right child index per node, `-1` marks a leaf.
    pub right: Vec<i32>,
    /// Leaf contribution per node. Unused for split nodes.
    pub value: Vec<f64>,
}

impl Tree {
    fn validate(&self, tree: usize, n_features: usize) -> Result<(), ModelError> {
        let nodes = self.feature.len();
        if nodes == 0 {
            return Err(malformed(tree, "tree has no nodes".to_string()));
        }
        if self.threshold.len() != nodes
            || self.left.len() != nodes
            || self.right.len() != nodes
            || self.value.len() != nodes
        {
            return Err(malformed(tree, "node arrays differ in length".to_string()));
        }
        for node in 0..nodes {
            if !self.threshold[node].is_finite() || !self.value[node].is_finite() {
                return Err(malformed(tree, format!("non-finite entry at node {node}")));
            }
            let (left, right) = (self.left[node], self.right[node]);
            if (left < 0) != (right < 0) {
                return Err(malformed(tree, format!("node {node} has only one child")));
            }
            if left < 0 {
                continue;
            }
            if self.feature[node] >= n_features {
                return Err(malformed(
                    tree,
                    format!(
                        "node {node} splits on feature {} of {n_features}",
                        self.feature[node]
                    ),
                ));
            }
            for child in [left, right] {
                let child = child as usize;
                if child <= node || child >= nodes {
                    return Err(malformed(
                        tree,
                        format!("node {node} points at out-of-order child {child}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Walk one feature row down to a leaf. Ties go right: the split
    /// sends a row left only when it is strictly below the threshold.
    fn score(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.left[node];
            if left < 0 {
                return self.value[node];
            }
            node = if row[self.feature[node]] < self.threshold[node] {
                left as usize
            } else {
                self.right[node] as usize
            };
        }
    }
}

fn malformed(tree: usize, reason: String) -> ModelError {
    ModelError::MalformedTree { tree, reason }
}

/// A trained boosted ensemble as serialized at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbtModel {
    pub model_id: String,
    pub model_version: String,
    /// RFC 3339 timestamp of the training run, when the trainer recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<String>,
    pub objective: String,
    /// Margin-space intercept added to every prediction.
    pub base_score: f64,
    /// Width of the feature rows this model was trained on.
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

impl GbtModel {
    /// Parse a model from JSON and validate its structure.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Check that the model is structurally sound: known objective,
    /// finite numbers, consistent node arrays, forward-pointing children
    /// and in-range feature indices.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.objective != LOGISTIC_OBJECTIVE {
            return Err(ModelError::UnsupportedObjective(self.objective.clone()));
        }
        if self.n_features == 0 {
            return Err(ModelError::ZeroFeatures);
        }
        if !self.base_score.is_finite() {
            return Err(ModelError::NonFiniteBaseScore(self.base_score));
        }
        if self.trees.is_empty() {
            return Err(ModelError::EmptyEnsemble);
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate(index, self.n_features)?;
        }
        Ok(())
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Raw margin for a feature row: base score plus every tree's leaf.
    pub fn margin(&self, row: &[f64]) -> f64 {
        debug_assert_eq!(row.len(), self.n_features);
        self.base_score + self.trees.iter().map(|tree| tree.score(row)).sum::<f64>()
    }

    /// Readmission probability for a feature row.
    pub fn predict(&self, row: &[f64]) -> Result<f64, ModelError> {
        if row.len() != self.n_features {
            return Err(ModelError::RowWidth {
                expected: self.n_features,
                got: row.len(),
            });
        }
        Ok(sigmoid(self.margin(row)))
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
