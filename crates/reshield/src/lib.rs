use serde::Serialize;
use thiserror::Error;

use reshield_core::align;
use reshield_core::record::{PatientRecord, RecordError};
use reshield_model::{ModelError, ScoringContext};
use reshield_risk::{classify, format_probability, risk_factors, RiskLabel};

pub use reshield_core::record as record_types;
pub use reshield_model::{ArtifactPaths, GbtModel};

/// Everything the clinician-facing surfaces show for one encounter.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub label: RiskLabel,
    pub probability: f64,
    pub probability_pct: String,
    pub risk_factors: Vec<String>,
    pub model_id: String,
    pub model_version: String,
}

#[derive(Debug, Error)]
pub enum AssessError {
    #[error("invalid patient record: {0}")]
    Record(#[from] RecordError),
    #[error("scoring failed: {0}")]
    Model(#[from] ModelError),
}

/// Assess one patient record against a loaded scoring context: validate
/// the record, align it onto the model's schema, run the ensemble, and
/// attach the heuristic risk factors.
///
/// The factors come from the raw record alone, so a record can read
/// "Low Risk" and still list factors, or read "High Risk" with none.
pub fn assess(
    context: &ScoringContext,
    record: &PatientRecord,
) -> Result<AssessmentReport, AssessError> {
    record.validate()?;
    let row = align(record, context.schema());
    let probability = context.model().predict(&row)?;
    let label = classify(probability);
    log::debug!(
        "scored record: probability={probability:.4} label='{label}'"
    );
    Ok(AssessmentReport {
        label,
        probability,
        probability_pct: format_probability(probability),
        risk_factors: risk_factors(record)
            .into_iter()
            .map(|factor| factor.to_string())
            .collect(),
        model_id: context.model().model_id.clone(),
        model_version: context.model().model_version.clone(),
    })
}
