//! Alignment under schema drift: trained schemas narrower or wider
//! than what the intake path produces.

use pretty_assertions::assert_eq;
use reshield::assess;
use reshield_core::{align, FeatureSchema, PatientRecord};
use reshield_model::testdata::low_risk_record;
use reshield_model::ScoringContext;
use reshield_risk::RiskLabel;
use tests::{full_universe_schema, single_leaf_model};

#[test]
fn encoded_columns_without_a_schema_slot_are_dropped() {
    // No race or insulin columns at all: those one-hots have nowhere
    // to land and the row is still exactly schema-wide.
    let schema = FeatureSchema::new(vec![
        "age_group".to_string(),
        "num_medications".to_string(),
        "gender_Female".to_string(),
        "gender_Male".to_string(),
    ])
    .expect("subset schema is valid");
    let model = single_leaf_model(-0.3, schema.len());
    let context = ScoringContext::from_parts(model, schema).expect("widths agree");

    let report = assess(&context, &low_risk_record()).expect("subset schema still scores");

    assert_eq!(report.label, RiskLabel::Low);
    // sigmoid(-0.3)
    assert!((report.probability - 0.425_557_483_188_341).abs() < 1e-12);
}

#[test]
fn schema_columns_the_record_never_lights_are_zero_filled() {
    let schema = full_universe_schema();

    let row = align(&PatientRecord::default(), &schema);

    assert_eq!(row.len(), 97);
    // Nine one-hot columns plus the six nonzero numerics of the default
    // profile; everything else zero-fills.
    let lit = row.iter().filter(|v| **v != 0.0).count();
    assert_eq!(lit, 15);
    let female = schema.position("gender_Female").expect("column present");
    assert_eq!(row[female], 1.0);
    let male = schema.position("gender_Male").expect("column present");
    assert_eq!(row[male], 0.0);
}

#[test]
fn constant_intake_fields_still_route_to_their_columns() {
    let schema = full_universe_schema();
    let mut record = PatientRecord::default();
    record.admission_type_id = "3".to_string();

    let row = align(&record, &schema);

    let slot = schema.position("admission_type_id_3").expect("column present");
    assert_eq!(row[slot], 1.0);
    let default_slot = schema.position("admission_type_id_1").expect("column present");
    assert_eq!(row[default_slot], 0.0);
}
