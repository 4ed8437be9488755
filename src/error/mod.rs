//! Error handling for the patient data pipeline.

use std::path::PathBuf;

use arrow::error::ArrowError;

/// Errors that can occur while running the pipeline
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A dataset file that was asked for does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An operation was called before the dataset it needs exists
    #[error("no dataset available: {0}")]
    NoData(&'static str),

    /// Error reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error converting to or from Arrow record batches
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error serializing a report to JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A loaded file does not match the expected dataset shape
    #[error("invalid column '{column}': {message}")]
    InvalidColumn {
        /// External name of the offending column
        column: String,
        /// What went wrong
        message: String,
    },

    /// Generator configuration that cannot produce a dataset
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Shorthand for a column shape/parse error
    pub fn invalid_column(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidColumn {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
