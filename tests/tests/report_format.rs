//! Pinned report values: a single-leaf ensemble makes the margin a
//! constant, so the probability, label and formatted percentage in the
//! report can be asserted exactly.

use pretty_assertions::assert_eq;
use reshield::assess;
use reshield_core::PatientRecord;
use reshield_model::ScoringContext;
use reshield_risk::RiskLabel;
use tests::{full_universe_schema, single_leaf_model};

fn pinned_context(leaf: f64) -> ScoringContext {
    let schema = full_universe_schema();
    let model = single_leaf_model(leaf, schema.len());
    ScoringContext::from_parts(model, schema).expect("model and schema widths agree")
}

#[test]
fn seventy_three_percent_reads_high_risk() {
    // leaf = logit(0.73), so the ensemble's probability is 0.73.
    let context = pinned_context((0.73f64 / 0.27).ln());

    let report = assess(&context, &PatientRecord::default()).expect("assessment succeeds");

    assert!((report.probability - 0.73).abs() < 1e-12);
    assert_eq!(report.label, RiskLabel::High);
    assert_eq!(report.probability_pct, "73.0%");
}

#[test]
fn exactly_one_half_reads_low_risk() {
    let context = pinned_context(0.0);

    let report = assess(&context, &PatientRecord::default()).expect("assessment succeeds");

    assert_eq!(report.probability, 0.5);
    assert_eq!(report.label, RiskLabel::Low);
    assert_eq!(report.probability_pct, "50.0%");
}

#[test]
fn twenty_seven_percent_reads_low_risk() {
    let context = pinned_context((0.27f64 / 0.73).ln());

    let report = assess(&context, &PatientRecord::default()).expect("assessment succeeds");

    assert!((report.probability - 0.27).abs() < 1e-12);
    assert_eq!(report.label, RiskLabel::Low);
    assert_eq!(report.probability_pct, "27.0%");
}
