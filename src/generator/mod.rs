//! Synthetic patient dataset generation
//!
//! Generation is deterministic for a fixed seed and patient count: a
//! single local `StdRng` drives every draw, columns are generated
//! column-by-column in schema order, then each non-identifier column
//! gets an independent missingness pass, then the derived columns are
//! computed. Keeping the RNG local (instead of seeding a process-wide
//! one) makes generation reentrant.

use log::debug;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;
use rand_distr::Normal;

use crate::config::{GeneratorConfig, NormalParams};
use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::models::{Column, PatientRecord, Sex};

/// Round to a fixed number of decimal places
fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Draw one rounded value per patient from a normal distribution
fn normal_column(rng: &mut StdRng, params: NormalParams, n: usize) -> Result<Vec<f64>> {
    let dist = Normal::new(params.mean, params.std_dev)
        .map_err(|e| PipelineError::InvalidConfig(format!("normal distribution: {e}")))?;
    Ok((0..n)
        .map(|_| round_to(dist.sample(rng), params.decimals))
        .collect())
}

/// Generate a synthetic patient dataset
///
/// Patient identifiers are `P0001` through `P{n:04}` in order. Every
/// column except the identifier is independently blanked with
/// probability `missing_rate`.
pub fn generate(config: &GeneratorConfig) -> Result<Dataset> {
    if config.n_patients == 0 {
        return Err(PipelineError::InvalidConfig(
            "patient count must be at least 1".to_string(),
        ));
    }
    if !(0.0..1.0).contains(&config.missing_rate) {
        return Err(PipelineError::InvalidConfig(format!(
            "missing rate {} outside [0, 1)",
            config.missing_rate
        )));
    }

    let n = config.n_patients;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut rows: Vec<PatientRecord> = (1..=n)
        .map(|i| PatientRecord::empty(format!("P{i:04}")))
        .collect();

    let (age_lo, age_hi) = config.age_range;
    if age_lo >= age_hi {
        return Err(PipelineError::InvalidConfig(format!(
            "age range [{age_lo}, {age_hi}) is empty"
        )));
    }
    let ages: Vec<i32> = (0..n).map(|_| rng.random_range(age_lo..age_hi)).collect();
    let sexes: Vec<Sex> = (0..n)
        .map(|_| {
            if rng.random_bool(0.5) {
                Sex::Male
            } else {
                Sex::Female
            }
        })
        .collect();
    let weights = normal_column(&mut rng, config.weight, n)?;
    let heights = normal_column(&mut rng, config.height, n)?;
    let systolics = normal_column(&mut rng, config.systolic_bp, n)?;
    let diastolics = normal_column(&mut rng, config.diastolic_bp, n)?;
    let cholesterols = normal_column(&mut rng, config.cholesterol, n)?;
    let glucoses = normal_column(&mut rng, config.glucose, n)?;

    let label_dist = WeightedIndex::new(config.label_weights)
        .map_err(|e| PipelineError::InvalidConfig(format!("label weights: {e}")))?;
    let labels: Vec<u8> = (0..n).map(|_| label_dist.sample(&mut rng) as u8 + 1).collect();

    for (i, row) in rows.iter_mut().enumerate() {
        row.age = Some(ages[i]);
        row.sex = Some(sexes[i]);
        row.weight = Some(weights[i]);
        row.height = Some(heights[i]);
        row.systolic_bp = Some(systolics[i]);
        row.diastolic_bp = Some(diastolics[i]);
        row.cholesterol = Some(cholesterols[i]);
        row.glucose = Some(glucoses[i]);
        row.label = Some(labels[i]);
    }

    // Independent ~missing_rate blanking per non-identifier column, one
    // pass per column so the draws stay column-aligned across runs.
    for column in Column::IMPUTABLE {
        let mut blanked = 0usize;
        for row in &mut rows {
            if rng.random::<f64>() < config.missing_rate {
                column.clear(row);
                blanked += 1;
            }
        }
        debug!("generated column '{column}' with {blanked} missing cells");
    }

    for row in &mut rows {
        row.recompute_derived();
    }

    Ok(Dataset::from_rows(rows))
}
