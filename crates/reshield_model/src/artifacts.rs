//! The trained artifact pair on disk and the immutable scoring context
//! built from it.
//!
//! A deployment ships two files next to each other: the ensemble JSON
//! and the feature-name list saved at training time. Both are read once
//! at startup, cross-checked, and then shared read-only for the life of
//! the process.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use reshield_core::schema::{FeatureSchema, SchemaError};

use crate::ensemble::{GbtModel, ModelError};

/// File name the trainer uses for the ensemble.
pub const DEFAULT_MODEL_FILE: &str = "xgb_readmission_model.json";
/// File name the trainer uses for the feature-name list.
pub const DEFAULT_FEATURES_FILE: &str = "feature_names.json";

/// Where the two artifact files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub features: PathBuf,
}

impl ArtifactPaths {
    pub fn new(model: impl Into<PathBuf>, features: impl Into<PathBuf>) -> Self {
        ArtifactPaths {
            model: model.into(),
            features: features.into(),
        }
    }

    /// The conventional file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        ArtifactPaths {
            model: dir.join(DEFAULT_MODEL_FILE),
            features: dir.join(DEFAULT_FEATURES_FILE),
        }
    }
}

impl Default for ArtifactPaths {
    /// The conventional file names in the working directory.
    fn default() -> Self {
        ArtifactPaths {
            model: PathBuf::from(DEFAULT_MODEL_FILE),
            features: PathBuf::from(DEFAULT_FEATURES_FILE),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact '{path}': {source}")]
    Model {
        path: String,
        #[source]
        source: ModelError,
    },
    #[error("feature list '{path}': {source}")]
    FeatureListIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("feature list '{path}': {source}")]
    FeatureListParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("feature list '{path}': {source}")]
    Schema {
        path: String,
        #[source]
        source: SchemaError,
    },
    #[error("model expects {model} features but the feature list has {schema}")]
    FeatureCountMismatch { model: usize, schema: usize },
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

/// Read the feature-name list the trainer saved alongside the model.
pub fn load_feature_names(path: &Path) -> Result<Vec<String>, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::FeatureListIo {
        path: display_path(path),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ArtifactError::FeatureListParse {
        path: display_path(path),
        source,
    })
}

/// Write a model and its feature-name list as the standard pair.
pub fn write_artifacts(
    model: &GbtModel,
    feature_names: &[String],
    paths: &ArtifactPaths,
) -> Result<(), ArtifactError> {
    let model_json =
        serde_json::to_string_pretty(model).map_err(|source| ArtifactError::Model {
            path: display_path(&paths.model),
            source: ModelError::Parse(source),
        })?;
    fs::write(&paths.model, model_json).map_err(|source| ArtifactError::Model {
        path: display_path(&paths.model),
        source: ModelError::Io(source),
    })?;
    let names_json = serde_json::to_string_pretty(feature_names).map_err(|source| {
        ArtifactError::FeatureListParse {
            path: display_path(&paths.features),
            source,
        }
    })?;
    fs::write(&paths.features, names_json).map_err(|source| ArtifactError::FeatureListIo {
        path: display_path(&paths.features),
        source,
    })?;
    Ok(())
}

/// A validated model and schema pair, loaded once and then only read.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    model: GbtModel,
    schema: FeatureSchema,
}

impl ScoringContext {
    /// Load both artifacts, validate each, and cross-check that the
    /// model's feature count matches the schema width.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let model = GbtModel::from_file(&paths.model).map_err(|source| ArtifactError::Model {
            path: display_path(&paths.model),
            source,
        })?;
        let names = load_feature_names(&paths.features)?;
        let schema = FeatureSchema::new(names).map_err(|source| ArtifactError::Schema {
            path: display_path(&paths.features),
            source,
        })?;
        let context = Self::from_parts(model, schema)?;
        log::info!(
            "loaded model '{}' v{} ({} trees over {} features)",
            context.model.model_id,
            context.model.model_version,
            context.model.n_trees(),
            context.schema.len()
        );
        Ok(context)
    }

    /// Pair an already-validated model with a schema.
    pub fn from_parts(model: GbtModel, schema: FeatureSchema) -> Result<Self, ArtifactError> {
        if model.n_features != schema.len() {
            return Err(ArtifactError::FeatureCountMismatch {
                model: model.n_features,
                schema: schema.len(),
            });
        }
        Ok(ScoringContext { model, schema })
    }

    pub fn model(&self) -> &GbtModel {
        &self.model
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }
}
