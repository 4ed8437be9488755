//! Core patient record definition
//!
//! This module contains the `PatientRecord` struct, the categorical types
//! it uses and the rules for the two derived columns (BMI and blood
//! pressure risk category).

use serde::{Deserialize, Serialize};

/// Sex of a patient
///
/// The dataset encodes sexes with the single-letter codes `H` (homme)
/// and `F` (femme); those codes are what the persisted CSV carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male (`H` in the persisted form)
    Male,
    /// Female (`F` in the persisted form)
    Female,
}

impl Sex {
    /// Single-letter code used in the persisted dataset
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "H",
            Self::Female => "F",
        }
    }

    /// Parse a persisted code back into a `Sex`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "H" => Some(Self::Male),
            "F" => Some(Self::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Blood pressure risk category derived from systolic pressure
///
/// Categories follow the fixed bin edges `(0, 120]`, `(120, 140]`,
/// `(140, 160]` and `(160, 300]`; a systolic value outside `(0, 300]`
/// falls in no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    /// Systolic pressure up to 120
    Normal,
    /// Systolic pressure in (120, 140]
    Prehypertension,
    /// Systolic pressure in (140, 160]
    HypertensionStage1,
    /// Systolic pressure in (160, 300]
    HypertensionStage2,
}

impl RiskCategory {
    /// All categories in ascending severity order
    pub const ALL: [Self; 4] = [
        Self::Normal,
        Self::Prehypertension,
        Self::HypertensionStage1,
        Self::HypertensionStage2,
    ];

    /// Human-readable label used in the persisted dataset
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Prehypertension => "Préhypertension",
            Self::HypertensionStage1 => "Hypertension stade 1",
            Self::HypertensionStage2 => "Hypertension stade 2",
        }
    }

    /// Parse a persisted label back into a category
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cat| cat.label() == label)
    }

    /// Categorize a systolic blood pressure reading
    #[must_use]
    pub fn from_systolic(systolic: f64) -> Option<Self> {
        if systolic > 0.0 && systolic <= 120.0 {
            Some(Self::Normal)
        } else if systolic > 120.0 && systolic <= 140.0 {
            Some(Self::Prehypertension)
        } else if systolic > 140.0 && systolic <= 160.0 {
            Some(Self::HypertensionStage1)
        } else if systolic > 160.0 && systolic <= 300.0 {
            Some(Self::HypertensionStage2)
        } else {
            None
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the patient dataset
///
/// Every column except the identifier can be missing; the generator
/// injects roughly 1% missingness per column and the cleaner fills the
/// gaps by median/mode imputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Unique identifier, `P` followed by a 4-digit sequence number
    pub patient_id: String,
    /// Age in years, uniform in [20, 80) at generation time
    pub age: Option<i32>,
    /// Sex of the patient
    pub sex: Option<Sex>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Systolic blood pressure in mmHg
    pub systolic_bp: Option<f64>,
    /// Diastolic blood pressure in mmHg
    pub diastolic_bp: Option<f64>,
    /// Total cholesterol in mg/dL
    pub cholesterol: Option<f64>,
    /// Blood glucose in mg/dL
    pub glucose: Option<f64>,
    /// Categorical outcome label, 1 through 5
    pub label: Option<u8>,
    /// Body mass index derived from weight and height
    pub bmi: Option<f64>,
    /// Risk category derived from systolic pressure
    pub risk_category: Option<RiskCategory>,
}

impl PatientRecord {
    /// Create a record with only the identifier set
    #[must_use]
    pub fn empty(patient_id: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            age: None,
            sex: None,
            weight: None,
            height: None,
            systolic_bp: None,
            diastolic_bp: None,
            cholesterol: None,
            glucose: None,
            label: None,
            bmi: None,
            risk_category: None,
        }
    }

    /// BMI from a weight/height pair, rounded to two decimals
    #[must_use]
    pub fn compute_bmi(weight: f64, height: f64) -> f64 {
        let meters = height / 100.0;
        (weight / (meters * meters) * 100.0).round() / 100.0
    }

    /// Recompute the derived columns from the current base columns
    ///
    /// `bmi` becomes `None` when weight or height is missing;
    /// `risk_category` becomes `None` when the systolic pressure is
    /// missing or out of the categorization range.
    pub fn recompute_derived(&mut self) {
        self.bmi = match (self.weight, self.height) {
            (Some(weight), Some(height)) => Some(Self::compute_bmi(weight, height)),
            _ => None,
        };
        self.risk_category = self.systolic_bp.and_then(RiskCategory::from_systolic);
    }
}
