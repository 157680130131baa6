//! End-to-end alignment checks against a training-shaped schema.

use proptest::prelude::*;
use proptest::sample::select;

use reshield_core::record::{
    A1cResult, Gender, Insulin, MaxGluSerum, PatientRecord, PrimaryDiagnosis, Race,
};
use reshield_core::schema::{expected_columns, FeatureSchema, NUMERIC_COLUMNS};
use reshield_core::{align, encode_columns};

/// A canonical list the way pandas would have written it: numerics
/// first, then dummy columns per field with levels sorted, including
/// levels the intake path can never produce.
fn training_schema() -> FeatureSchema {
    let columns = [
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
    ];
    FeatureSchema::new(columns.iter().map(|c| c.to_string()).collect()).unwrap()
}

#[test]
fn training_layout_gets_the_right_columns_hot() {
    let schema = training_schema();
    let record = PatientRecord {
        gender: Gender::Male,
        race: Race::AfricanAmerican,
        age_group: 8,
        time_in_hospital: 9,
        num_lab_procedures: 55,
        num_medications: 24,
        service_utilization: 4,
        primary_diagnosis: PrimaryDiagnosis::Circulatory,
        a1c_result: A1cResult::Over8,
        max_glu_serum: MaxGluSerum::None,
        ..PatientRecord::default()
    };
    let row = align(&record, &schema);

    assert_eq!(row.len(), schema.len());
    assert_eq!(row[schema.position("age_group").unwrap()], 8.0);
    assert_eq!(row[schema.position("num_medications").unwrap()], 24.0);
    assert_eq!(row[schema.position("gender_Male").unwrap()], 1.0);
    assert_eq!(row[schema.position("gender_Female").unwrap()], 0.0);
    assert_eq!(row[schema.position("A1Cresult_>8").unwrap()], 1.0);
    assert_eq!(row[schema.position("max_glu_serum_None").unwrap()], 1.0);
    // Levels only the training data ever saw stay cold.
    assert_eq!(row[schema.position("admission_type_id_3").unwrap()], 0.0);
    assert_eq!(row[schema.position("insulin_Up").unwrap()], 0.0);
    assert_eq!(row[schema.position("insulin_No").unwrap()], 1.0);
}

fn arb_record() -> impl Strategy<Value = PatientRecord> {
    (
        (
            select(Gender::ALL.to_vec()),
            select(Race::ALL.to_vec()),
            0u32..=9u32,
            1u32..=14u32,
            0u32..=150u32,
        ),
        (
            0u32..=100u32,
            0u32..=20u32,
            select(PrimaryDiagnosis::ALL.to_vec()),
            select(A1cResult::ALL.to_vec()),
            select(MaxGluSerum::ALL.to_vec()),
            select(Insulin::ALL.to_vec()),
        ),
    )
        .prop_map(
            |(
                (gender, race, age_group, time_in_hospital, num_lab_procedures),
                (
                    num_medications,
                    service_utilization,
                    primary_diagnosis,
                    a1c_result,
                    max_glu_serum,
                    insulin,
                ),
            )| PatientRecord {
                gender,
                race,
                age_group,
                time_in_hospital,
                num_lab_procedures,
                num_medications,
                service_utilization,
                primary_diagnosis,
                a1c_result,
                max_glu_serum,
                insulin,
                ..PatientRecord::default()
            },
        )
}

proptest! {
    #[test]
    fn any_form_record_validates(record in arb_record()) {
        prop_assert!(record.validate().is_ok());
    }

    #[test]
    fn row_width_always_matches_schema(record in arb_record()) {
        let schema = FeatureSchema::new(expected_columns()).unwrap();
        let row = align(&record, &schema);
        prop_assert_eq!(row.len(), schema.len());
    }

    #[test]
    fn exactly_one_hot_column_per_categorical_field(record in arb_record()) {
        let schema = FeatureSchema::new(expected_columns()).unwrap();
        let row = align(&record, &schema);
        let hot: f64 = row[NUMERIC_COLUMNS.len()..].iter().sum();
        // 9 categorical fields, one level hot each.
        prop_assert_eq!(hot, 9.0);
        prop_assert!(row[NUMERIC_COLUMNS.len()..]
            .iter()
            .all(|v| *v == 0.0 || *v == 1.0));
    }

    #[test]
    fn every_encoded_column_lands_at_its_schema_position(record in arb_record()) {
        let schema = FeatureSchema::new(expected_columns()).unwrap();
        let row = align(&record, &schema);
        for (name, value) in encode_columns(&record) {
            let position = schema.position(&name).unwrap();
            prop_assert_eq!(row[position], value);
        }
    }
}
