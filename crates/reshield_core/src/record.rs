//! Patient encounter records as they arrive from a form or an API call.
//!
//! Categorical fields are closed enums whose serialized spellings match
//! the column spellings used at training time, so a record can be turned
//! into one-hot column names without any lookup tables.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient gender as recorded at admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    Caucasian,
    AfricanAmerican,
    Hispanic,
    Other,
    Asian,
}

impl Race {
    pub const ALL: [Race; 5] = [
        Race::Caucasian,
        Race::AfricanAmerican,
        Race::Hispanic,
        Race::Other,
        Race::Asian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Caucasian => "Caucasian",
            Race::AfricanAmerican => "AfricanAmerican",
            Race::Hispanic => "Hispanic",
            Race::Other => "Other",
            Race::Asian => "Asian",
        }
    }
}

/// Grouped primary diagnosis (ICD-9 chapter level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryDiagnosis {
    Circulatory,
    Respiratory,
    Digestive,
    Diabetes,
    Injury,
    Musculoskeletal,
    Genitourinary,
    Neoplasms,
    Other,
}

impl PrimaryDiagnosis {
    pub const ALL: [PrimaryDiagnosis; 9] = [
        PrimaryDiagnosis::Circulatory,
        PrimaryDiagnosis::Respiratory,
        PrimaryDiagnosis::Digestive,
        PrimaryDiagnosis::Diabetes,
        PrimaryDiagnosis::Injury,
        PrimaryDiagnosis::Musculoskeletal,
        PrimaryDiagnosis::Genitourinary,
        PrimaryDiagnosis::Neoplasms,
        PrimaryDiagnosis::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryDiagnosis::Circulatory => "Circulatory",
            PrimaryDiagnosis::Respiratory => "Respiratory",
            PrimaryDiagnosis::Digestive => "Digestive",
            PrimaryDiagnosis::Diabetes => "Diabetes",
            PrimaryDiagnosis::Injury => "Injury",
            PrimaryDiagnosis::Musculoskeletal => "Musculoskeletal",
            PrimaryDiagnosis::Genitourinary => "Genitourinary",
            PrimaryDiagnosis::Neoplasms => "Neoplasms",
            PrimaryDiagnosis::Other => "Other",
        }
    }
}

/// HbA1c test outcome. `None` means the test was not taken, not a
/// missing value, and it one-hot encodes like any other level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum A1cResult {
    None,
    Norm,
    #[serde(rename = ">7")]
    Over7,
    #[serde(rename = ">8")]
    Over8,
}

impl A1cResult {
    pub const ALL: [A1cResult; 4] = [
        A1cResult::None,
        A1cResult::Norm,
        A1cResult::Over7,
        A1cResult::Over8,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            A1cResult::None => "None",
            A1cResult::Norm => "Norm",
            A1cResult::Over7 => ">7",
            A1cResult::Over8 => ">8",
        }
    }
}

/// Maximum glucose serum test outcome, same conventions as [`A1cResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxGluSerum {
    None,
    Norm,
    #[serde(rename = ">200")]
    Over200,
    #[serde(rename = ">300")]
    Over300,
}

impl MaxGluSerum {
    pub const ALL: [MaxGluSerum; 4] = [
        MaxGluSerum::None,
        MaxGluSerum::Norm,
        MaxGluSerum::Over200,
        MaxGluSerum::Over300,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaxGluSerum::None => "None",
            MaxGluSerum::Norm => "Norm",
            MaxGluSerum::Over200 => ">200",
            MaxGluSerum::Over300 => ">300",
        }
    }
}

/// Insulin prescription status during the stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Insulin {
    No,
    Down,
    Steady,
    Up,
}

impl Insulin {
    pub const ALL: [Insulin; 4] = [Insulin::No, Insulin::Down, Insulin::Steady, Insulin::Up];

    pub fn as_str(&self) -> &'static str {
        match self {
            Insulin::No => "No",
            Insulin::Down => "Down",
            Insulin::Steady => "Steady",
            Insulin::Up => "Up",
        }
    }
}

impl Default for Insulin {
    fn default() -> Self {
        Insulin::No
    }
}

/// Admission type codes from the source dataset's ID mapping.
pub const ADMISSION_TYPE_CODES: [&str; 8] = ["1", "2", "3", "4", "5", "6", "7", "8"];

/// Discharge disposition codes from the source dataset's ID mapping.
pub const DISCHARGE_DISPOSITION_CODES: [&str; 29] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29",
];

/// Admission source codes from the source dataset's ID mapping.
pub const ADMISSION_SOURCE_CODES: [&str; 25] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25",
];

/// One hospital encounter, ready for scoring.
///
/// The first ten fields come straight from the intake form. The rest are
/// fixed for the demo intake path and default to the values the model
/// was calibrated around: a routine emergency-room admission, discharged
/// home, on diabetes medication, with no insulin adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub gender: Gender,
    pub race: Race,
    /// Age bracket index, 0 = [0-10) through 9 = [90-100).
    pub age_group: u32,
    /// Length of stay in days, 1 to 14.
    pub time_in_hospital: u32,
    pub num_lab_procedures: u32,
    pub num_medications: u32,
    /// Outpatient, inpatient and emergency visits in the preceding year.
    pub service_utilization: u32,
    pub primary_diagnosis: PrimaryDiagnosis,
    pub a1c_result: A1cResult,
    pub max_glu_serum: MaxGluSerum,
    #[serde(default = "default_admission_type")]
    pub admission_type_id: String,
    #[serde(default = "default_discharge_disposition")]
    pub discharge_disposition_id: String,
    #[serde(default = "default_admission_source")]
    pub admission_source_id: String,
    #[serde(default)]
    pub insulin: Insulin,
    #[serde(default)]
    pub med_change: u32,
    #[serde(default = "default_has_diabetes_med")]
    pub has_diabetes_med: u32,
}

fn default_admission_type() -> String {
    "1".to_string()
}

fn default_discharge_disposition() -> String {
    "1".to_string()
}

fn default_admission_source() -> String {
    "7".to_string()
}

fn default_has_diabetes_med() -> u32 {
    1
}

impl Default for PatientRecord {
    /// The intake form's initial state: a 70-something Caucasian woman,
    /// three days in hospital, one prior visit, no glucose tests taken.
    fn default() -> Self {
        PatientRecord {
            gender: Gender::Female,
            race: Race::Caucasian,
            age_group: 7,
            time_in_hospital: 3,
            num_lab_procedures: 40,
            num_medications: 15,
            service_utilization: 1,
            primary_diagnosis: PrimaryDiagnosis::Circulatory,
            a1c_result: A1cResult::None,
            max_glu_serum: MaxGluSerum::None,
            admission_type_id: default_admission_type(),
            discharge_disposition_id: default_discharge_disposition(),
            admission_source_id: default_admission_source(),
            insulin: Insulin::default(),
            med_change: 0,
            has_diabetes_med: default_has_diabetes_med(),
        }
    }
}

/// Why a [`PatientRecord`] was rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{field} is {value}, outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("{field} code '{value}' is not in the dataset's ID mapping")]
    UnknownCode { field: &'static str, value: String },
}

impl PatientRecord {
    /// Check every numeric field against its intake bounds and every ID
    /// code against the dataset mapping. The enums cannot hold bad
    /// values, so they need no check here.
    pub fn validate(&self) -> Result<(), RecordError> {
        check_range("age_group", self.age_group, 0, 9)?;
        check_range("time_in_hospital", self.time_in_hospital, 1, 14)?;
        check_range("num_lab_procedures", self.num_lab_procedures, 0, 150)?;
        check_range("num_medications", self.num_medications, 0, 100)?;
        check_range("service_utilization", self.service_utilization, 0, 20)?;
        check_range("med_change", self.med_change, 0, 1)?;
        check_range("has_diabetes_med", self.has_diabetes_med, 0, 1)?;
        check_code(
            "admission_type_id",
            &self.admission_type_id,
            &ADMISSION_TYPE_CODES,
        )?;
        check_code(
            "discharge_disposition_id",
            &self.discharge_disposition_id,
            &DISCHARGE_DISPOSITION_CODES,
        )?;
        check_code(
            "admission_source_id",
            &self.admission_source_id,
            &ADMISSION_SOURCE_CODES,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), RecordError> {
    if value < min || value > max {
        return Err(RecordError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_code(field: &'static str, value: &str, known: &[&str]) -> Result<(), RecordError> {
    if !known.contains(&value) {
        return Err(RecordError::UnknownCode {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
