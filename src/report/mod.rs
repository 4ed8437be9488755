//! Report generation and JSON export
//!
//! The report is a nested key-value summary computed on demand from the
//! raw dataset (the cleaned copy is analysis input, not report input).
//! Serialized field names keep the source vocabulary so the exported
//! JSON stays compatible with downstream consumers of the original
//! report files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{Column, Sex};
use crate::stats;

/// Dataset-wide headline numbers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralSummary {
    /// Total number of patients
    #[serde(rename = "nombre_total_patients")]
    pub total_patients: usize,
    /// Mean age over patients with a known age
    #[serde(rename = "age_moyen")]
    pub mean_age: f64,
    /// Youngest known age
    #[serde(rename = "age_min")]
    pub min_age: i32,
    /// Oldest known age
    #[serde(rename = "age_max")]
    pub max_age: i32,
    /// `males:females` counts over patients with a known sex
    #[serde(rename = "ratio_hommes_femmes")]
    pub sex_ratio: String,
    /// Mean BMI over patients with a known BMI
    #[serde(rename = "imc_moyen")]
    pub mean_bmi: f64,
}

/// Subgroup summary for outcome label 4
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelFourSummary {
    /// Number of label-4 patients
    #[serde(rename = "nombre")]
    pub count: usize,
    /// Share of the dataset, in percent
    #[serde(rename = "pourcentage")]
    pub pct: f64,
    /// Mean age of the subgroup, 0 when the subgroup is empty
    #[serde(rename = "age_moyen")]
    pub mean_age: f64,
    /// Identifiers of the label-4 patients, in row order
    #[serde(rename = "liste_ids")]
    pub patient_ids: Vec<String>,
}

/// Aggregate health indicators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStats {
    /// Mean blood pressure as a `systolic/diastolic` string
    #[serde(rename = "tension_moyenne")]
    pub mean_blood_pressure: String,
    /// Mean cholesterol
    #[serde(rename = "cholesterol_moyen")]
    pub mean_cholesterol: f64,
    /// Mean glucose
    #[serde(rename = "glucose_moyen")]
    pub mean_glucose: f64,
    /// Number of patients with systolic pressure above 140
    #[serde(rename = "patients_hypertendus")]
    pub hypertensive_patients: usize,
}

/// Nested summary report over a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Headline numbers
    #[serde(rename = "resume_general")]
    pub general: GeneralSummary,
    /// Patient count per outcome label, ordered by label
    #[serde(rename = "distribution_labels")]
    pub label_distribution: BTreeMap<u8, usize>,
    /// Label-4 subgroup
    #[serde(rename = "patients_label_4")]
    pub label_four: LabelFourSummary,
    /// Aggregate health indicators
    #[serde(rename = "statistiques_sante")]
    pub health: HealthStats,
}

fn mean_or_zero(values: &[f64]) -> f64 {
    stats::mean(values).unwrap_or(0.0)
}

/// Build a report over a dataset
#[must_use]
pub fn build_report(dataset: &Dataset) -> Report {
    let ages = dataset.numeric_values(Column::Age);
    let known_ages: Vec<i32> = dataset.iter().filter_map(|r| r.age).collect();

    let males = dataset.iter().filter(|r| r.sex == Some(Sex::Male)).count();
    let females = dataset
        .iter()
        .filter(|r| r.sex == Some(Sex::Female))
        .count();

    let mut label_distribution: BTreeMap<u8, usize> = BTreeMap::new();
    for label in dataset.iter().filter_map(|r| r.label) {
        *label_distribution.entry(label).or_insert(0) += 1;
    }

    let label_four_rows: Vec<_> = dataset.iter().filter(|r| r.label == Some(4)).collect();
    let label_four_ages: Vec<f64> = label_four_rows
        .iter()
        .filter_map(|r| r.age.map(f64::from))
        .collect();

    let mean_systolic = mean_or_zero(&dataset.numeric_values(Column::SystolicBp));
    let mean_diastolic = mean_or_zero(&dataset.numeric_values(Column::DiastolicBp));

    Report {
        general: GeneralSummary {
            total_patients: dataset.len(),
            mean_age: mean_or_zero(&ages),
            min_age: known_ages.iter().copied().min().unwrap_or(0),
            max_age: known_ages.iter().copied().max().unwrap_or(0),
            sex_ratio: format!("{males}:{females}"),
            mean_bmi: mean_or_zero(&dataset.numeric_values(Column::Bmi)),
        },
        label_distribution,
        label_four: LabelFourSummary {
            count: label_four_rows.len(),
            pct: if dataset.is_empty() {
                0.0
            } else {
                label_four_rows.len() as f64 / dataset.len() as f64 * 100.0
            },
            mean_age: mean_or_zero(&label_four_ages),
            patient_ids: label_four_rows
                .iter()
                .map(|r| r.patient_id.clone())
                .collect(),
        },
        health: HealthStats {
            mean_blood_pressure: format!("{mean_systolic:.0}/{mean_diastolic:.0}"),
            mean_cholesterol: mean_or_zero(&dataset.numeric_values(Column::Cholesterol)),
            mean_glucose: mean_or_zero(&dataset.numeric_values(Column::Glucose)),
            hypertensive_patients: dataset
                .iter()
                .filter(|r| r.systolic_bp.is_some_and(|s| s > 140.0))
                .count(),
        },
    }
}

/// Build a report and write it out as pretty-printed UTF-8 JSON
///
/// Non-ASCII characters are written literally, not escaped. Filesystem
/// errors propagate to the caller.
pub fn export_report(dataset: &Dataset, path: &Path) -> Result<Report> {
    let report = build_report(dataset);
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
    info!("report saved to {}", path.display());
    Ok(report)
}
