//! CSV read and write paths for the persisted dataset

use std::fs::File;
use std::path::Path;

use arrow::csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::io::convert::{dataset_schema, from_record_batch, to_record_batch};

/// Write a dataset to a CSV file
///
/// One header row, missing cells written as empty fields, non-ASCII
/// category labels written literally.
pub fn save_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let batch = to_record_batch(dataset)?;
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;
    info!("saved {} patients to {}", dataset.len(), path.display());
    Ok(())
}

/// Read a dataset back from a CSV file
///
/// A missing path is a [`PipelineError::NotFound`]; a file that does not
/// match the dataset shape is an error naming the offending column. The
/// rows are only returned once the entire file has converted, so callers
/// never observe a partially loaded dataset.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(PipelineError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = ReaderBuilder::new(dataset_schema())
        .with_header(true)
        .build(file)?;

    let mut rows = Vec::new();
    for batch in reader {
        rows.extend(from_record_batch(&batch?)?);
    }

    info!("loaded {} patients from {}", rows.len(), path.display());
    Ok(Dataset::from_rows(rows))
}
