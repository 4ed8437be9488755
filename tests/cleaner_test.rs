use patient_pipeline::cleaner::clean;
use patient_pipeline::config::GeneratorConfig;
use patient_pipeline::dataset::Dataset;
use patient_pipeline::generator::generate;
use patient_pipeline::models::{Column, PatientRecord, Sex};

/// A fully populated record with simple values, to be blanked per test
fn base_record(id: usize) -> PatientRecord {
    let mut record = PatientRecord::empty(format!("P{id:04}"));
    record.age = Some(40);
    record.sex = Some(Sex::Male);
    record.weight = Some(70.0);
    record.height = Some(170.0);
    record.systolic_bp = Some(120.0);
    record.diastolic_bp = Some(80.0);
    record.cholesterol = Some(200.0);
    record.glucose = Some(100.0);
    record.label = Some(2);
    record.recompute_derived();
    record
}

#[test]
fn test_cleaning_fills_every_missing_cell() {
    let raw = generate(&GeneratorConfig::with_size(500, 7)).unwrap();
    let cleaned = clean(&raw);

    assert_eq!(cleaned.len(), raw.len());
    for (column, count) in cleaned.missing_counts() {
        assert_eq!(count, 0, "column {column} still has missing cells");
    }
}

#[test]
fn test_raw_dataset_is_left_untouched() {
    let raw = generate(&GeneratorConfig::with_size(300, 7)).unwrap();
    let before = raw.clone();
    let _cleaned = clean(&raw);
    assert_eq!(raw, before);
}

#[test]
fn test_cleaning_is_idempotent() {
    let raw = generate(&GeneratorConfig::with_size(300, 7)).unwrap();
    let cleaned = clean(&raw);
    assert_eq!(clean(&cleaned), cleaned);
}

#[test]
fn test_float_columns_use_interpolated_median() {
    let mut rows: Vec<PatientRecord> = (1..=5).map(base_record).collect();
    rows[0].weight = Some(60.0);
    rows[1].weight = Some(64.0);
    rows[2].weight = Some(82.0);
    rows[3].weight = Some(90.0);
    rows[4].weight = None;
    let cleaned = clean(&Dataset::from_rows(rows));

    // median of [60, 64, 82, 90] is (64 + 82) / 2
    assert_eq!(cleaned.rows()[4].weight, Some(73.0));
}

#[test]
fn test_integer_columns_use_lower_median() {
    let mut rows: Vec<PatientRecord> = (1..=5).map(base_record).collect();
    rows[0].age = Some(30);
    rows[1].age = Some(45);
    rows[2].age = Some(51);
    rows[3].age = Some(70);
    rows[4].age = None;
    let cleaned = clean(&Dataset::from_rows(rows));

    // lower median of [30, 45, 51, 70] stays at an observed value
    assert_eq!(cleaned.rows()[4].age, Some(45));
}

#[test]
fn test_sex_uses_mode_with_first_encounter_tie_break() {
    let mut rows: Vec<PatientRecord> = (1..=5).map(base_record).collect();
    rows[0].sex = Some(Sex::Female);
    rows[1].sex = Some(Sex::Female);
    rows[2].sex = Some(Sex::Male);
    rows[3].sex = None;
    rows[4].sex = None;
    let cleaned = clean(&Dataset::from_rows(rows));
    assert_eq!(cleaned.rows()[3].sex, Some(Sex::Female));
    assert_eq!(cleaned.rows()[4].sex, Some(Sex::Female));

    // exact tie: the sex seen first in row order wins
    let mut rows: Vec<PatientRecord> = (1..=5).map(base_record).collect();
    rows[0].sex = Some(Sex::Female);
    rows[1].sex = Some(Sex::Male);
    rows[2].sex = Some(Sex::Male);
    rows[3].sex = Some(Sex::Female);
    rows[4].sex = None;
    let cleaned = clean(&Dataset::from_rows(rows));
    assert_eq!(cleaned.rows()[4].sex, Some(Sex::Female));
}

#[test]
fn test_derived_columns_are_recomputed_from_imputed_inputs() {
    let mut rows: Vec<PatientRecord> = (1..=3).map(base_record).collect();
    rows[0].weight = Some(60.0);
    rows[1].weight = Some(80.0);
    rows[2].weight = None;
    for row in &mut rows {
        row.recompute_derived();
    }
    assert_eq!(rows[2].bmi, None);

    let cleaned = clean(&Dataset::from_rows(rows));
    // weight imputed to median 70, bmi follows from the imputed value
    assert_eq!(cleaned.rows()[2].weight, Some(70.0));
    assert_eq!(
        cleaned.rows()[2].bmi,
        Some(PatientRecord::compute_bmi(70.0, 170.0))
    );
}

#[test]
fn test_fully_missing_column_is_left_alone() {
    let mut rows: Vec<PatientRecord> = (1..=3).map(base_record).collect();
    for row in &mut rows {
        row.glucose = None;
    }
    let cleaned = clean(&Dataset::from_rows(rows));
    assert_eq!(cleaned.missing_in(Column::Glucose), 3);
}
