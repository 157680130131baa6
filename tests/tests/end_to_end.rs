//! Whole-pipeline tests: demo artifacts written to disk, loaded back,
//! and scored through the public assessment entry point.

use pretty_assertions::assert_eq;
use reshield::{assess, AssessError};
use reshield_core::PatientRecord;
use reshield_model::testdata::{high_risk_record, low_risk_record, write_demo_artifacts};
use reshield_model::ScoringContext;
use reshield_risk::RiskLabel;

fn loaded_demo_context(dir: &tempfile::TempDir) -> ScoringContext {
    let paths = write_demo_artifacts(dir.path()).expect("demo artifacts written");
    ScoringContext::load(&paths).expect("artifacts load back from disk")
}

#[test]
fn high_utilization_profile_reads_high_risk_with_every_factor() {
    let dir = tempfile::tempdir().expect("tempdir");
    let context = loaded_demo_context(&dir);

    let report = assess(&context, &high_risk_record()).expect("assessment succeeds");

    assert_eq!(report.label, RiskLabel::High);
    // margin 2.0 through the logistic link
    assert!((report.probability - 0.880_797_077_977_882_3).abs() < 1e-12);
    assert_eq!(report.probability_pct, "88.1%");
    assert_eq!(
        report.risk_factors,
        vec![
            "High History of Hospital Use".to_string(),
            "Polypharmacy (High Meds)".to_string(),
            "Advanced Age".to_string(),
            "Circulatory Diagnosis".to_string(),
        ]
    );
    assert_eq!(report.model_id, "readmit-gbt-demo");
    assert_eq!(report.model_version, "1.0.0");
}

#[test]
fn stable_outpatient_profile_reads_low_risk_with_no_factors() {
    let dir = tempfile::tempdir().expect("tempdir");
    let context = loaded_demo_context(&dir);

    let report = assess(&context, &low_risk_record()).expect("assessment succeeds");

    assert_eq!(report.label, RiskLabel::Low);
    assert_eq!(report.probability_pct, "18.2%");
    assert!(report.risk_factors.is_empty());
}

#[test]
fn form_defaults_read_low_risk_with_the_circulatory_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let context = loaded_demo_context(&dir);

    let report = assess(&context, &PatientRecord::default()).expect("assessment succeeds");

    assert_eq!(report.label, RiskLabel::Low);
    assert_eq!(report.probability_pct, "31.0%");
    assert_eq!(report.risk_factors, vec!["Circulatory Diagnosis".to_string()]);
}

#[test]
fn intake_form_payload_parses_to_the_typed_record() {
    // Exactly what the web form posts: the ten intake fields, nothing else.
    let json = r#"{
        "gender": "Male",
        "race": "Caucasian",
        "age_group": 9,
        "time_in_hospital": 10,
        "num_lab_procedures": 70,
        "num_medications": 25,
        "service_utilization": 5,
        "primary_diagnosis": "Circulatory",
        "a1c_result": ">8",
        "max_glu_serum": ">200"
    }"#;
    let record: PatientRecord = serde_json::from_str(json).expect("form payload parses");
    assert_eq!(record, high_risk_record());
}

#[test]
fn out_of_range_record_is_rejected_before_scoring() {
    let dir = tempfile::tempdir().expect("tempdir");
    let context = loaded_demo_context(&dir);

    let mut record = PatientRecord::default();
    record.age_group = 12;

    let err = assess(&context, &record).expect_err("validation should reject");
    assert!(matches!(err, AssessError::Record(_)));
    assert!(err.to_string().contains("age_group"));
}
