//! Trained-model side of Readmission Shield: the gradient-boosted tree
//! ensemble format, structural validation, inference, and loading of the
//! model/feature-list artifact pair from disk.

pub mod artifacts;
pub mod ensemble;
pub mod testdata;

pub use artifacts::{
    load_feature_names, write_artifacts, ArtifactError, ArtifactPaths, ScoringContext,
    DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE,
};
pub use ensemble::{GbtModel, ModelError, Tree, LOGISTIC_OBJECTIVE};
