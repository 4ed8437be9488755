//! Conversion between datasets and Arrow record batches

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::dataset::Dataset;
use crate::error::{PipelineError, Result};
use crate::models::{Column, PatientRecord, RiskCategory, Sex};

/// Arrow schema of the persisted dataset, columns in persisted order
#[must_use]
pub fn dataset_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(Column::PatientId.name(), DataType::Utf8, false),
        Field::new(Column::Age.name(), DataType::Int32, true),
        Field::new(Column::Sex.name(), DataType::Utf8, true),
        Field::new(Column::Weight.name(), DataType::Float64, true),
        Field::new(Column::Height.name(), DataType::Float64, true),
        Field::new(Column::SystolicBp.name(), DataType::Float64, true),
        Field::new(Column::DiastolicBp.name(), DataType::Float64, true),
        Field::new(Column::Cholesterol.name(), DataType::Float64, true),
        Field::new(Column::Glucose.name(), DataType::Float64, true),
        Field::new(Column::Label.name(), DataType::Int64, true),
        Field::new(Column::Bmi.name(), DataType::Float64, true),
        Field::new(Column::RiskCategory.name(), DataType::Utf8, true),
    ]))
}

fn float_column(
    rows: &[PatientRecord],
    extract: impl Fn(&PatientRecord) -> Option<f64>,
) -> ArrayRef {
    Arc::new(rows.iter().map(extract).collect::<Float64Array>())
}

/// Convert a dataset into a record batch with the persisted schema
pub fn to_record_batch(dataset: &Dataset) -> Result<RecordBatch> {
    let rows = dataset.rows();

    let ids: StringArray = rows.iter().map(|r| Some(r.patient_id.as_str())).collect();
    let ages: Int32Array = rows.iter().map(|r| r.age).collect();
    let sexes: StringArray = rows.iter().map(|r| r.sex.map(Sex::code)).collect();
    let labels: Int64Array = rows.iter().map(|r| r.label.map(i64::from)).collect();
    let categories: StringArray = rows
        .iter()
        .map(|r| r.risk_category.map(RiskCategory::label))
        .collect();

    let columns: Vec<ArrayRef> = vec![
        Arc::new(ids),
        Arc::new(ages),
        Arc::new(sexes),
        float_column(rows, |r| r.weight),
        float_column(rows, |r| r.height),
        float_column(rows, |r| r.systolic_bp),
        float_column(rows, |r| r.diastolic_bp),
        float_column(rows, |r| r.cholesterol),
        float_column(rows, |r| r.glucose),
        Arc::new(labels),
        float_column(rows, |r| r.bmi),
        Arc::new(categories),
    ];

    Ok(RecordBatch::try_new(dataset_schema(), columns)?)
}

/// Downcast a named column of a batch to a concrete array type
fn typed_column<'a, T: 'static>(batch: &'a RecordBatch, column: Column) -> Result<&'a T> {
    batch
        .column_by_name(column.name())
        .ok_or_else(|| PipelineError::invalid_column(column.name(), "column is missing"))?
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| PipelineError::invalid_column(column.name(), "unexpected data type"))
}

fn string_cell(array: &StringArray, index: usize) -> Option<&str> {
    if array.is_null(index) {
        return None;
    }
    // the CSV reader yields "" rather than null for empty text cells
    Some(array.value(index)).filter(|s| !s.is_empty())
}

fn float_cell(array: &Float64Array, index: usize) -> Option<f64> {
    if array.is_null(index) {
        None
    } else {
        Some(array.value(index))
    }
}

/// Convert a record batch with the persisted schema back into rows
///
/// Derived columns are taken verbatim from the batch, not recomputed, so
/// a load faithfully reproduces what was saved.
pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<PatientRecord>> {
    let ids = typed_column::<StringArray>(batch, Column::PatientId)?;
    let ages = typed_column::<Int32Array>(batch, Column::Age)?;
    let sexes = typed_column::<StringArray>(batch, Column::Sex)?;
    let weights = typed_column::<Float64Array>(batch, Column::Weight)?;
    let heights = typed_column::<Float64Array>(batch, Column::Height)?;
    let systolics = typed_column::<Float64Array>(batch, Column::SystolicBp)?;
    let diastolics = typed_column::<Float64Array>(batch, Column::DiastolicBp)?;
    let cholesterols = typed_column::<Float64Array>(batch, Column::Cholesterol)?;
    let glucoses = typed_column::<Float64Array>(batch, Column::Glucose)?;
    let labels = typed_column::<Int64Array>(batch, Column::Label)?;
    let bmis = typed_column::<Float64Array>(batch, Column::Bmi)?;
    let categories = typed_column::<StringArray>(batch, Column::RiskCategory)?;

    let mut rows = Vec::with_capacity(batch.num_rows());
    for i in 0..batch.num_rows() {
        if ids.is_null(i) {
            return Err(PipelineError::invalid_column(
                Column::PatientId.name(),
                format!("missing identifier in row {i}"),
            ));
        }

        let sex = match string_cell(sexes, i) {
            None => None,
            Some(code) => Some(Sex::from_code(code).ok_or_else(|| {
                PipelineError::invalid_column(
                    Column::Sex.name(),
                    format!("unknown sex code '{code}' in row {i}"),
                )
            })?),
        };
        let risk_category = match string_cell(categories, i) {
            None => None,
            Some(label) => Some(RiskCategory::from_label(label).ok_or_else(|| {
                PipelineError::invalid_column(
                    Column::RiskCategory.name(),
                    format!("unknown risk category '{label}' in row {i}"),
                )
            })?),
        };
        let label = if labels.is_null(i) {
            None
        } else {
            let value = labels.value(i);
            Some(u8::try_from(value).map_err(|_| {
                PipelineError::invalid_column(
                    Column::Label.name(),
                    format!("label {value} out of range in row {i}"),
                )
            })?)
        };

        rows.push(PatientRecord {
            patient_id: ids.value(i).to_string(),
            age: if ages.is_null(i) {
                None
            } else {
                Some(ages.value(i))
            },
            sex,
            weight: float_cell(weights, i),
            height: float_cell(heights, i),
            systolic_bp: float_cell(systolics, i),
            diastolic_bp: float_cell(diastolics, i),
            cholesterol: float_cell(cholesterols, i),
            glucose: float_cell(glucoses, i),
            label,
            bmi: float_cell(bmis, i),
            risk_category,
        });
    }
    Ok(rows)
}
