//! One-hot encoding and reindexing of a record onto a feature schema.

use std::collections::HashMap;

use crate::record::PatientRecord;
use crate::schema::{one_hot_column, FeatureSchema};

/// Encode a record into named columns: numerics pass through, each
/// categorical field contributes a single hot column set to 1.0.
pub fn encode_columns(record: &PatientRecord) -> Vec<(String, f64)> {
    vec![
        ("age_group".to_string(), f64::from(record.age_group)),
        (
            "time_in_hospital".to_string(),
            f64::from(record.time_in_hospital),
        ),
        (
            "num_lab_procedures".to_string(),
            f64::from(record.num_lab_procedures),
        ),
        (
            "num_medications".to_string(),
            f64::from(record.num_medications),
        ),
        (
            "service_utilization".to_string(),
            f64::from(record.service_utilization),
        ),
        ("med_change".to_string(), f64::from(record.med_change)),
        (
            "has_diabetes_med".to_string(),
            f64::from(record.has_diabetes_med),
        ),
        (one_hot_column("gender", record.gender.as_str()), 1.0),
        (one_hot_column("race", record.race.as_str()), 1.0),
        (
            one_hot_column("primary_diagnosis", record.primary_diagnosis.as_str()),
            1.0,
        ),
        (one_hot_column("A1Cresult", record.a1c_result.as_str()), 1.0),
        (
            one_hot_column("max_glu_serum", record.max_glu_serum.as_str()),
            1.0,
        ),
        (
            one_hot_column("admission_type_id", &record.admission_type_id),
            1.0,
        ),
        (
            one_hot_column(
                "discharge_disposition_id",
                &record.discharge_disposition_id,
            ),
            1.0,
        ),
        (
            one_hot_column("admission_source_id", &record.admission_source_id),
            1.0,
        ),
        (one_hot_column("insulin", record.insulin.as_str()), 1.0),
    ]
}

/// Reindex an encoded record onto the schema's column order.
///
/// Canonical columns the record does not light up are zero-filled;
/// encoded columns the schema does not know are dropped. Both cases are
/// expected whenever the training data saw more categorical levels than
/// one record can carry, so neither is an error.
pub fn align(record: &PatientRecord, schema: &FeatureSchema) -> Vec<f64> {
    let encoded: HashMap<String, f64> = encode_columns(record).into_iter().collect();
    for name in encoded.keys() {
        if !schema.contains(name) {
            log::debug!("encoded column '{name}' is not in the schema, dropping it");
        }
    }
    schema
        .columns()
        .iter()
        .map(|column| encoded.get(column).copied().unwrap_or(0.0))
        .collect()
}
