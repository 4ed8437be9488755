//! The patient data pipeline facade
//!
//! `PatientDataPipeline` owns the dataset through its three states
//! (absent, raw, cleaned) and exposes the generate, persist, load,
//! clean, analyze and report operations in one place. Operations called
//! out of order fail with [`PipelineError::NoData`]; nothing is retried
//! or recovered internally.

use std::path::Path;

use arrow::util::pretty::pretty_format_batches;
use log::{info, warn};

use crate::analyzer::{self, Analysis};
use crate::cleaner;
use crate::config::GeneratorConfig;
use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::generator;
use crate::io;
use crate::models::{Column, LiteralValue};
use crate::report::{self, Report};

/// Owns the dataset through the generate → clean → analyze → report run
#[derive(Debug, Default)]
pub struct PatientDataPipeline {
    config: GeneratorConfig,
    raw: Option<Dataset>,
    cleaned: Option<Dataset>,
}

impl PatientDataPipeline {
    /// Pipeline with the default generator configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with a custom generator configuration
    #[must_use]
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            raw: None,
            cleaned: None,
        }
    }

    /// The raw dataset, if one has been generated or loaded
    #[must_use]
    pub fn raw(&self) -> Option<&Dataset> {
        self.raw.as_ref()
    }

    /// The cleaned dataset, if cleaning has run
    #[must_use]
    pub fn cleaned(&self) -> Option<&Dataset> {
        self.cleaned.as_ref()
    }

    /// Generate a fresh raw dataset of `n_patients` rows
    ///
    /// Replaces any previously held raw dataset and invalidates the
    /// cleaned copy.
    pub fn generate(&mut self, n_patients: usize) -> Result<&Dataset> {
        let config = GeneratorConfig {
            n_patients,
            ..self.config.clone()
        };
        let dataset = generator::generate(&config)?;
        info!("generated {} patients (seed {})", dataset.len(), config.seed);
        self.cleaned = None;
        Ok(self.raw.insert(dataset))
    }

    /// Render the first `n` raw rows as an aligned text table
    pub fn preview(&self, n: usize) -> Result<String> {
        let raw = self.raw.as_ref().ok_or(PipelineError::NoData(
            "generate or load a dataset before previewing",
        ))?;
        let head = Dataset::from_rows(raw.rows().iter().take(n).cloned().collect());
        let batch = io::to_record_batch(&head)?;
        Ok(pretty_format_batches(&[batch])?.to_string())
    }

    /// Save the raw dataset as CSV
    ///
    /// Returns `Ok(false)` without touching the filesystem when no
    /// dataset is held; write failures propagate.
    pub fn save(&self, path: &Path) -> Result<bool> {
        match &self.raw {
            None => {
                warn!("nothing to save, no dataset has been generated or loaded");
                Ok(false)
            }
            Some(dataset) => {
                io::save_csv(dataset, path)?;
                Ok(true)
            }
        }
    }

    /// Load a raw dataset from CSV
    ///
    /// A missing path is a [`PipelineError::NotFound`] and leaves the
    /// pipeline's datasets exactly as they were.
    pub fn load(&mut self, path: &Path) -> Result<&Dataset> {
        let dataset = io::load_csv(path)?;
        self.cleaned = None;
        Ok(self.raw.insert(dataset))
    }

    /// Produce the cleaned dataset from the raw one
    ///
    /// The raw dataset is retained unmodified.
    pub fn clean(&mut self) -> Result<&Dataset> {
        let raw = self.raw.as_ref().ok_or(PipelineError::NoData(
            "generate or load a dataset before cleaning",
        ))?;
        Ok(self.cleaned.insert(cleaner::clean(raw)))
    }

    /// Filter the cleaned dataset on `column == value` and describe the subset
    pub fn analyze(&self, column: Column, value: &LiteralValue) -> Result<Analysis> {
        let cleaned = self
            .cleaned
            .as_ref()
            .ok_or(PipelineError::NoData("clean the dataset before analyzing"))?;
        Ok(analyzer::analyze(cleaned, column, value))
    }

    /// Build the summary report over the raw dataset
    ///
    /// The report always reads the raw dataset, so it reflects the data
    /// as generated or loaded rather than the imputed copy.
    pub fn report(&self) -> Result<Report> {
        let raw = self.raw.as_ref().ok_or(PipelineError::NoData(
            "generate or load a dataset before reporting",
        ))?;
        Ok(report::build_report(raw))
    }

    /// Build the report and export it as JSON
    pub fn export_report(&self, path: &Path) -> Result<Report> {
        let raw = self.raw.as_ref().ok_or(PipelineError::NoData(
            "generate or load a dataset before reporting",
        ))?;
        report::export_report(raw, path)
    }
}
