//! Shared fixtures for the integration suite.
//!
//! Unit coverage lives inside each crate; the tests under `tests/` here
//! exercise the whole pipeline, from artifacts on disk through the
//! final assessment report.

use reshield_core::schema::expected_columns;
use reshield_core::FeatureSchema;
use reshield_model::{GbtModel, Tree, LOGISTIC_OBJECTIVE};

/// Schema over every column the encoder can ever produce, in
/// declaration order.
pub fn full_universe_schema() -> FeatureSchema {
    FeatureSchema::new(expected_columns()).expect("column universe is a valid schema")
}

/// Model with a single leaf-only tree and zero base score, so the
/// margin is exactly `leaf` for every input row. Handy for pinning the
/// probability a report is built from.
pub fn single_leaf_model(leaf: f64, n_features: usize) -> GbtModel {
    GbtModel {
        model_id: "fixture".to_string(),
        model_version: "0.0.0".to_string(),
        trained_at: None,
        objective: LOGISTIC_OBJECTIVE.to_string(),
        base_score: 0.0,
        n_features,
        trees: vec![Tree {
            feature: vec![0],
            threshold: vec![0.0],
            left: vec![-1],
            right: vec![-1],
            value: vec![leaf],
        }],
    }
}
