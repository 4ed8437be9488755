//! In-memory patient dataset
//!
//! A `Dataset` is the ordered collection of patient records the pipeline
//! holds between operations. It is deliberately a thin wrapper: cleaning
//! and analysis live in their own modules and take datasets as input.

use crate::models::{Column, LiteralValue, PatientRecord};

/// Ordered collection of patient records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<PatientRecord>,
}

impl Dataset {
    /// Wrap a vector of records
    #[must_use]
    pub fn from_rows(rows: Vec<PatientRecord>) -> Self {
        Self { rows }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Borrow the rows
    #[must_use]
    pub fn rows(&self) -> &[PatientRecord] {
        &self.rows
    }

    /// Iterate over the rows
    pub fn iter(&self) -> std::slice::Iter<'_, PatientRecord> {
        self.rows.iter()
    }

    /// Mutably iterate over the rows
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PatientRecord> {
        self.rows.iter_mut()
    }

    /// Consume the dataset, yielding its rows
    #[must_use]
    pub fn into_rows(self) -> Vec<PatientRecord> {
        self.rows
    }

    /// Number of missing cells in one column
    #[must_use]
    pub fn missing_in(&self, column: Column) -> usize {
        self.rows.iter().filter(|r| column.is_missing(r)).count()
    }

    /// Missing-cell counts for every column, in column order
    #[must_use]
    pub fn missing_counts(&self) -> Vec<(Column, usize)> {
        Column::ALL
            .into_iter()
            .map(|column| (column, self.missing_in(column)))
            .collect()
    }

    /// Number of rows whose `column` cell equals `value`
    #[must_use]
    pub fn count_where(&self, column: Column, value: &LiteralValue) -> usize {
        self.rows
            .iter()
            .filter(|r| column.matches(r, value))
            .count()
    }

    /// Non-missing numeric values of a column, in row order
    #[must_use]
    pub fn numeric_values(&self, column: Column) -> Vec<f64> {
        self.rows.iter().filter_map(|r| column.as_f64(r)).collect()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a PatientRecord;
    type IntoIter = std::slice::Iter<'a, PatientRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
