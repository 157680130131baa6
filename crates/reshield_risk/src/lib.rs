//! Risk classification and heuristic risk factors.
//!
//! Two independent readings of one encounter: the model's calibrated
//! probability collapsed to a binary label, and a short list of
//! clinician-facing factors derived from the raw record alone. The
//! factors never look at the model, so they stay explainable even when
//! the ensemble is retrained.

use serde::{Deserialize, Serialize};

use reshield_core::record::{PatientRecord, PrimaryDiagnosis};

/// Binary readmission call shown to the clinician.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLabel {
    pub fn is_high(&self) -> bool {
        matches!(self, RiskLabel::High)
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::High => write!(f, "High Risk"),
            RiskLabel::Low => write!(f, "Low Risk"),
        }
    }
}

/// Collapse a probability to the display label. The cut is strict:
/// exactly 0.5 reads as low risk.
pub fn classify(probability: f64) -> RiskLabel {
    if probability > 0.5 {
        RiskLabel::High
    } else {
        RiskLabel::Low
    }
}

/// One decimal place, percent: `0.73` renders as `73.0%`.
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Heuristic factors a clinician can act on, in fixed display order.
/// Empty when nothing stands out.
pub fn risk_factors(record: &PatientRecord) -> Vec<&'static str> {
    let mut factors = Vec::new();
    if record.service_utilization > 1 {
        factors.push("High History of Hospital Use");
    }
    if record.num_medications > 20 {
        factors.push("Polypharmacy (High Meds)");
    }
    if record.age_group > 7 {
        factors.push("Advanced Age");
    }
    if record.primary_diagnosis == PrimaryDiagnosis::Circulatory {
        factors.push("Circulatory Diagnosis");
    }
    factors
}
