//! Demo artifacts and record factories for integration tests, benches
//! and the `demo` subcommand.
//!
//! The demo ensemble is hand-built but shaped like a real training run:
//! it splits on prior utilization, medication load, age, a circulatory
//! diagnosis and glycemic control, and its schema contains categorical
//! levels the intake path can never produce, so the zero-fill side of
//! alignment is exercised on every prediction.

use std::path::Path;

use reshield_core::record::{
    A1cResult, Gender, MaxGluSerum, PatientRecord, PrimaryDiagnosis, Race,
};
use reshield_core::schema::FeatureSchema;

use crate::artifacts::{write_artifacts, ArtifactError, ArtifactPaths, ScoringContext};
use crate::ensemble::{GbtModel, Tree, LOGISTIC_OBJECTIVE};

/// Column list as the demo training run saved it: numerics first, then
/// dummy columns with levels in sorted order.
pub fn demo_feature_names() -> Vec<String> {
    [
        "age_group",
        "time_in_hospital",
        "num_lab_procedures",
        "num_medications",
        "service_utilization",
        "med_change",
        "has_diabetes_med",
        "gender_Female",
        "gender_Male",
        "race_AfricanAmerican",
        "race_Asian",
        "race_Caucasian",
        "race_Hispanic",
        "race_Other",
        "primary_diagnosis_Circulatory",
        "primary_diagnosis_Diabetes",
        "primary_diagnosis_Digestive",
        "primary_diagnosis_Genitourinary",
        "primary_diagnosis_Injury",
        "primary_diagnosis_Musculoskeletal",
        "primary_diagnosis_Neoplasms",
        "primary_diagnosis_Other",
        "primary_diagnosis_Respiratory",
        "A1Cresult_>7",
        "A1Cresult_>8",
        "A1Cresult_None",
        "A1Cresult_Norm",
        "max_glu_serum_>200",
        "max_glu_serum_>300",
        "max_glu_serum_None",
        "max_glu_serum_Norm",
        "admission_type_id_1",
        "admission_type_id_3",
        "discharge_disposition_id_1",
        "admission_source_id_1",
        "admission_source_id_7",
        "insulin_Down",
        "insulin_No",
        "insulin_Steady",
        "insulin_Up",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

pub fn demo_schema() -> FeatureSchema {
    FeatureSchema::new(demo_feature_names()).expect("demo feature names are in the universe")
}

/// A four-tree ensemble over [`demo_feature_names`].
///
/// Tree by tree: prior utilization escalated by medication count, age
/// bracket, circulatory diagnosis, and an A1c above 8 escalated by a
/// long stay. Margins land around -1.5 for a stable outpatient profile
/// and around +2.0 for a frail high-utilization one.
pub fn demo_model() -> GbtModel {
    let utilization_meds = Tree {
        feature: vec![4, 0, 3, 0, 0],
        threshold: vec![2.0, 0.0, 20.5, 0.0, 0.0],
        left: vec![1, -1, 3, -1, -1],
        right: vec![2, -1, 4, -1, -1],
        value: vec![0.0, -0.6, 0.0, 0.35, 0.9],
    };
    let age = Tree {
        feature: vec![0, 0, 0],
        threshold: vec![7.5, 0.0, 0.0],
        left: vec![1, -1, -1],
        right: vec![2, -1, -1],
        value: vec![0.0, -0.3, 0.55],
    };
    let circulatory = Tree {
        feature: vec![14, 0, 0],
        threshold: vec![0.5, 0.0, 0.0],
        left: vec![1, -1, -1],
        right: vec![2, -1, -1],
        value: vec![0.0, -0.2, 0.5],
    };
    let glycemia_stay = Tree {
        feature: vec![24, 1, 0, 0, 0],
        threshold: vec![0.5, 7.5, 0.0, 0.0, 0.0],
        left: vec![1, 3, -1, -1, -1],
        right: vec![2, 4, -1, -1, -1],
        value: vec![0.0, 0.0, 0.3, -0.15, 0.2],
    };

    GbtModel {
        model_id: "readmit-gbt-demo".to_string(),
        model_version: "1.0.0".to_string(),
        trained_at: None,
        objective: LOGISTIC_OBJECTIVE.to_string(),
        base_score: -0.25,
        n_features: 40,
        trees: vec![utilization_meds, age, circulatory, glycemia_stay],
    }
}

pub fn demo_context() -> ScoringContext {
    ScoringContext::from_parts(demo_model(), demo_schema())
        .expect("demo model and schema agree on width")
}

/// Write the demo pair under `dir` with the conventional file names.
pub fn write_demo_artifacts(dir: &Path) -> Result<ArtifactPaths, ArtifactError> {
    let paths = ArtifactPaths::in_dir(dir);
    write_artifacts(&demo_model(), &demo_feature_names(), &paths)?;
    Ok(paths)
}

/// An elderly high-utilization circulatory patient with poor glycemic
/// control. Scores high and trips every heuristic risk factor.
pub fn high_risk_record() -> PatientRecord {
    PatientRecord {
        gender: Gender::Male,
        race: Race::Caucasian,
        age_group: 9,
        time_in_hospital: 10,
        num_lab_procedures: 70,
        num_medications: 25,
        service_utilization: 5,
        primary_diagnosis: PrimaryDiagnosis::Circulatory,
        a1c_result: A1cResult::Over8,
        max_glu_serum: MaxGluSerum::Over200,
        ..PatientRecord::default()
    }
}

/// A young low-utilization injury patient. Scores low and trips no
/// heuristic risk factor.
pub fn low_risk_record() -> PatientRecord {
    PatientRecord {
        gender: Gender::Female,
        race: Race::Hispanic,
        age_group: 4,
        time_in_hospital: 2,
        num_lab_procedures: 20,
        num_medications: 10,
        service_utilization: 1,
        primary_diagnosis: PrimaryDiagnosis::Injury,
        a1c_result: A1cResult::Norm,
        max_glu_serum: MaxGluSerum::Norm,
        ..PatientRecord::default()
    }
}
