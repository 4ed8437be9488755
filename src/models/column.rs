//! Typed column handles for the patient dataset
//!
//! The persisted form keeps the source vocabulary for column names
//! (`poids`, `taille`, `tensionSystolique`, ...); this module owns the
//! mapping between those external names and the English model fields,
//! and provides the typed access the cleaner and analyzer need.

use crate::models::patient::{PatientRecord, RiskCategory, Sex};

/// What kind of data a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Unique row identifier, never missing, never imputed
    Identifier,
    /// Integer-valued numeric column
    Integer,
    /// Floating point numeric column
    Float,
    /// Categorical column
    Categorical,
    /// Column derived from other columns, recomputed rather than imputed
    Derived,
}

/// A column of the patient dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `patientId`
    PatientId,
    /// `age`
    Age,
    /// `sexe`
    Sex,
    /// `poids` (weight, kg)
    Weight,
    /// `taille` (height, cm)
    Height,
    /// `tensionSystolique`
    SystolicBp,
    /// `tensionDiastolique`
    DiastolicBp,
    /// `cholesterol`
    Cholesterol,
    /// `glucose`
    Glucose,
    /// `label`
    Label,
    /// `imc` (derived BMI)
    Bmi,
    /// `catRisque` (derived risk category)
    RiskCategory,
}

impl Column {
    /// All columns in persisted order
    pub const ALL: [Self; 12] = [
        Self::PatientId,
        Self::Age,
        Self::Sex,
        Self::Weight,
        Self::Height,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::Cholesterol,
        Self::Glucose,
        Self::Label,
        Self::Bmi,
        Self::RiskCategory,
    ];

    /// Columns that receive imputation during cleaning, in column order
    pub const IMPUTABLE: [Self; 9] = [
        Self::Age,
        Self::Sex,
        Self::Weight,
        Self::Height,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::Cholesterol,
        Self::Glucose,
        Self::Label,
    ];

    /// Columns summarized by the analyzer's descriptive statistics block
    pub const STATS: [Self; 8] = [
        Self::Age,
        Self::Weight,
        Self::Height,
        Self::Bmi,
        Self::SystolicBp,
        Self::DiastolicBp,
        Self::Cholesterol,
        Self::Glucose,
    ];

    /// Columns compared against the population mean by the analyzer
    pub const COMPARED: [Self; 3] = [Self::Age, Self::Bmi, Self::SystolicBp];

    /// External (persisted) name of the column
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PatientId => "patientId",
            Self::Age => "age",
            Self::Sex => "sexe",
            Self::Weight => "poids",
            Self::Height => "taille",
            Self::SystolicBp => "tensionSystolique",
            Self::DiastolicBp => "tensionDiastolique",
            Self::Cholesterol => "cholesterol",
            Self::Glucose => "glucose",
            Self::Label => "label",
            Self::Bmi => "imc",
            Self::RiskCategory => "catRisque",
        }
    }

    /// Look a column up by its external name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|col| col.name() == name)
    }

    /// The kind of data this column holds
    #[must_use]
    pub const fn kind(self) -> ColumnKind {
        match self {
            Self::PatientId => ColumnKind::Identifier,
            Self::Age | Self::Label => ColumnKind::Integer,
            Self::Weight
            | Self::Height
            | Self::SystolicBp
            | Self::DiastolicBp
            | Self::Cholesterol
            | Self::Glucose => ColumnKind::Float,
            Self::Sex => ColumnKind::Categorical,
            Self::Bmi | Self::RiskCategory => ColumnKind::Derived,
        }
    }

    /// Whether the cell for this column is missing in `record`
    #[must_use]
    pub fn is_missing(self, record: &PatientRecord) -> bool {
        match self {
            Self::PatientId => false,
            Self::Age => record.age.is_none(),
            Self::Sex => record.sex.is_none(),
            Self::Weight => record.weight.is_none(),
            Self::Height => record.height.is_none(),
            Self::SystolicBp => record.systolic_bp.is_none(),
            Self::DiastolicBp => record.diastolic_bp.is_none(),
            Self::Cholesterol => record.cholesterol.is_none(),
            Self::Glucose => record.glucose.is_none(),
            Self::Label => record.label.is_none(),
            Self::Bmi => record.bmi.is_none(),
            Self::RiskCategory => record.risk_category.is_none(),
        }
    }

    /// Numeric view of the cell, if this column is numeric and present
    ///
    /// Integer columns are widened to `f64`; categorical and identifier
    /// columns have no numeric view.
    #[must_use]
    pub fn as_f64(self, record: &PatientRecord) -> Option<f64> {
        match self {
            Self::Age => record.age.map(f64::from),
            Self::Weight => record.weight,
            Self::Height => record.height,
            Self::SystolicBp => record.systolic_bp,
            Self::DiastolicBp => record.diastolic_bp,
            Self::Cholesterol => record.cholesterol,
            Self::Glucose => record.glucose,
            Self::Label => record.label.map(f64::from),
            Self::Bmi => record.bmi,
            Self::PatientId | Self::Sex | Self::RiskCategory => None,
        }
    }

    /// Write an imputed numeric value back into the cell
    ///
    /// Integer columns expect an integral value (the cleaner guarantees
    /// this by using the lower median for them). Calls on non-numeric
    /// columns are ignored.
    pub fn set_f64(self, record: &mut PatientRecord, value: f64) {
        match self {
            Self::Age => record.age = Some(value as i32),
            Self::Weight => record.weight = Some(value),
            Self::Height => record.height = Some(value),
            Self::SystolicBp => record.systolic_bp = Some(value),
            Self::DiastolicBp => record.diastolic_bp = Some(value),
            Self::Cholesterol => record.cholesterol = Some(value),
            Self::Glucose => record.glucose = Some(value),
            Self::Label => record.label = Some(value as u8),
            Self::Bmi => record.bmi = Some(value),
            Self::PatientId | Self::Sex | Self::RiskCategory => {}
        }
    }

    /// Blank the cell out
    ///
    /// The identifier column cannot be blanked; calls on it are ignored.
    pub fn clear(self, record: &mut PatientRecord) {
        match self {
            Self::PatientId => {}
            Self::Age => record.age = None,
            Self::Sex => record.sex = None,
            Self::Weight => record.weight = None,
            Self::Height => record.height = None,
            Self::SystolicBp => record.systolic_bp = None,
            Self::DiastolicBp => record.diastolic_bp = None,
            Self::Cholesterol => record.cholesterol = None,
            Self::Glucose => record.glucose = None,
            Self::Label => record.label = None,
            Self::Bmi => record.bmi = None,
            Self::RiskCategory => record.risk_category = None,
        }
    }

    /// Whether the cell equals `value`
    ///
    /// Missing cells never match, mirroring NaN comparison semantics in
    /// the source data tooling.
    #[must_use]
    pub fn matches(self, record: &PatientRecord, value: &LiteralValue) -> bool {
        match self {
            Self::PatientId => match value {
                LiteralValue::String(s) => record.patient_id == *s,
                _ => false,
            },
            Self::Sex => match (record.sex, value) {
                (Some(sex), LiteralValue::String(s)) => sex.code() == s,
                _ => false,
            },
            Self::RiskCategory => match (&record.risk_category, value) {
                (Some(cat), LiteralValue::String(s)) => cat.label() == s,
                _ => false,
            },
            _ => match (self.as_f64(record), value) {
                (Some(cell), LiteralValue::Int(i)) => cell == *i as f64,
                (Some(cell), LiteralValue::Float(f)) => cell == *f,
                _ => false,
            },
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A literal value that a column can be filtered against
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
}

impl std::fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
