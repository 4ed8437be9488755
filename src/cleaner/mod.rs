//! Missing-value imputation
//!
//! Cleaning produces a new dataset; the raw input is never modified.
//! Numeric columns are filled with the column median computed over the
//! raw non-missing values (integer columns use the lower median so the
//! fill stays in the column's domain), the categorical sex column is
//! filled with its mode, and the derived columns are recomputed from the
//! imputed inputs so a cleaned dataset is internally consistent.

use log::{info, warn};

use crate::dataset::Dataset;
use crate::models::{Column, ColumnKind, Sex};
use crate::stats;

/// Impute a numeric column in place, returning the fill value used
fn impute_numeric(dataset: &mut Dataset, column: Column) -> Option<f64> {
    let fill = match column.kind() {
        ColumnKind::Integer => {
            let values: Vec<i64> = dataset
                .iter()
                .filter_map(|r| column.as_f64(r))
                .map(|v| v as i64)
                .collect();
            stats::lower_median(&values).map(|m| m as f64)
        }
        _ => stats::median(&dataset.numeric_values(column)),
    }?;

    for row in dataset.iter_mut() {
        if column.is_missing(row) {
            column.set_f64(row, fill);
        }
    }
    Some(fill)
}

/// Impute the sex column in place, returning the mode used
fn impute_sex(dataset: &mut Dataset) -> Option<Sex> {
    let fill = stats::mode(dataset.iter().filter_map(|r| r.sex))?;
    for row in dataset.iter_mut() {
        if row.sex.is_none() {
            row.sex = Some(fill);
        }
    }
    Some(fill)
}

/// Produce a cleaned copy of a raw dataset
///
/// Logs the per-column missing counts found before imputation and the
/// fill value chosen for each column. A column with no non-missing
/// values at all cannot be imputed and is left as-is with a warning.
#[must_use]
pub fn clean(raw: &Dataset) -> Dataset {
    let mut cleaned = raw.clone();

    info!("missing values per column before cleaning:");
    for (column, count) in raw.missing_counts() {
        if count > 0 {
            info!("  {column}: {count} values");
        }
    }

    for column in Column::IMPUTABLE {
        match column.kind() {
            ColumnKind::Categorical => match impute_sex(&mut cleaned) {
                Some(fill) => info!("missing '{column}' cells replaced by mode: {fill}"),
                None => warn!("column '{column}' has no values to impute from"),
            },
            _ => match impute_numeric(&mut cleaned, column) {
                Some(fill) => info!("missing '{column}' cells replaced by median: {fill}"),
                None => warn!("column '{column}' has no values to impute from"),
            },
        }
    }

    // Derived columns are recomputed from the imputed inputs rather than
    // median-filled, so stale values from generation time never survive
    // cleaning.
    for row in cleaned.iter_mut() {
        row.recompute_derived();
    }

    info!("cleaning finished: {} rows", cleaned.len());
    cleaned
}
