//! Data model for the patient dataset
//!
//! This module contains the patient record entity and the typed column
//! handles used by cleaning, analysis and persistence.

pub mod column;
pub mod patient;

pub use column::{Column, ColumnKind, LiteralValue};
pub use patient::{PatientRecord, RiskCategory, Sex};
