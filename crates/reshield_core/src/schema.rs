//! The canonical feature schema: the ordered column list a trained
//! ensemble expects, exactly as saved at training time.
//!
//! Every column name a schema may legally contain is enumerable at
//! compile time from the closed value sets in [`crate::record`], so a
//! loaded schema is checked against that universe up front instead of
//! being trusted at scoring time.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use thiserror::Error;

use crate::record::{
    A1cResult, Gender, Insulin, MaxGluSerum, PrimaryDiagnosis, Race, ADMISSION_SOURCE_CODES,
    ADMISSION_TYPE_CODES, DISCHARGE_DISPOSITION_CODES,
};

/// Columns carried through as plain numbers, in training-frame order.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "age_group",
    "time_in_hospital",
    "num_lab_procedures",
    "num_medications",
    "service_utilization",
    "med_change",
    "has_diabetes_med",
];

/// Column name for one level of a categorical field, e.g.
/// `race_Caucasian` or `A1Cresult_>7`.
pub fn one_hot_column(field: &str, value: &str) -> String {
    format!("{field}_{value}")
}

/// Every categorical field with its full legal value set, in
/// training-frame order. The HbA1c field is spelled `A1Cresult` here
/// because that is the column prefix the training frame used.
pub fn categorical_fields() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("gender", Gender::ALL.iter().map(Gender::as_str).collect()),
        ("race", Race::ALL.iter().map(Race::as_str).collect()),
        (
            "primary_diagnosis",
            PrimaryDiagnosis::ALL
                .iter()
                .map(PrimaryDiagnosis::as_str)
                .collect(),
        ),
        (
            "A1Cresult",
            A1cResult::ALL.iter().map(A1cResult::as_str).collect(),
        ),
        (
            "max_glu_serum",
            MaxGluSerum::ALL.iter().map(MaxGluSerum::as_str).collect(),
        ),
        ("admission_type_id", ADMISSION_TYPE_CODES.to_vec()),
        (
            "discharge_disposition_id",
            DISCHARGE_DISPOSITION_CODES.to_vec(),
        ),
        ("admission_source_id", ADMISSION_SOURCE_CODES.to_vec()),
        ("insulin", Insulin::ALL.iter().map(Insulin::as_str).collect()),
    ]
}

lazy_static! {
    static ref COLUMN_UNIVERSE: HashSet<String> = {
        let mut universe: HashSet<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
        for (field, values) in categorical_fields() {
            for value in values {
                universe.insert(one_hot_column(field, value));
            }
        }
        universe
    };
}

/// All column names a schema may contain, numerics first, then each
/// categorical field's levels in declaration order.
pub fn expected_columns() -> Vec<String> {
    let mut columns: Vec<String> = NUMERIC_COLUMNS.iter().map(|c| c.to_string()).collect();
    for (field, values) in categorical_fields() {
        for value in values {
            columns.push(one_hot_column(field, value));
        }
    }
    columns
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("feature schema is empty")]
    Empty,
    #[error("feature schema lists column '{0}' twice")]
    DuplicateColumn(String),
    #[error("feature schema column '{0}' is not in the known column universe")]
    UnknownColumn(String),
}

/// Ordered list of feature columns, validated against the column
/// universe. Positions are indexed for the alignment step.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    columns: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut positions = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            if !COLUMN_UNIVERSE.contains(column) {
                return Err(SchemaError::UnknownColumn(column.clone()));
            }
            if positions.insert(column.clone(), index).is_some() {
                return Err(SchemaError::DuplicateColumn(column.clone()));
            }
        }
        Ok(FeatureSchema { columns, positions })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.positions.contains_key(column)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }
}
