//! Core domain types for Readmission Shield.
//!
//! This crate holds everything that is true about a patient encounter
//! before any trained model enters the picture: the [`PatientRecord`]
//! input type, the canonical [`FeatureSchema`] a trained ensemble
//! expects, and the [`align`] step that turns one into a feature row
//! for the other.
//!
//! The crate is deliberately free of I/O. Loading artifacts from disk
//! lives in `reshield_model`; serving them lives further up the stack.

pub mod encode;
pub mod record;
pub mod schema;

pub use encode::{align, encode_columns};
pub use record::{
    A1cResult, Gender, Insulin, MaxGluSerum, PatientRecord, PrimaryDiagnosis, Race, RecordError,
};
pub use schema::{FeatureSchema, SchemaError, NUMERIC_COLUMNS};
