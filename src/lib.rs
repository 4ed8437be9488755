//! A Rust library for generating, cleaning and analyzing synthetic
//! patient datasets, with CSV persistence and JSON report export.

pub mod analyzer;
pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod stats;

// Re-export the most common types for easier use
// Core types
pub use config::GeneratorConfig;
pub use dataset::Dataset;
pub use error::{PipelineError, Result};
pub use models::{Column, LiteralValue, PatientRecord, RiskCategory, Sex};
pub use pipeline::PatientDataPipeline;

// Analysis and reporting
pub use analyzer::{Analysis, AnalysisSummary};
pub use report::Report;

// Arrow types
pub use arrow::record_batch::RecordBatch;
