use std::fs;

use patient_pipeline::dataset::Dataset;
use patient_pipeline::models::{PatientRecord, Sex};
use patient_pipeline::report::{build_report, export_report};

fn record(
    id: usize,
    age: Option<i32>,
    sex: Option<Sex>,
    label: Option<u8>,
    systolic: Option<f64>,
) -> PatientRecord {
    let mut record = PatientRecord::empty(format!("P{id:04}"));
    record.age = age;
    record.sex = sex;
    record.weight = Some(70.0);
    record.height = Some(170.0);
    record.systolic_bp = systolic;
    record.diastolic_bp = Some(80.0);
    record.cholesterol = Some(200.0);
    record.glucose = Some(100.0);
    record.label = label;
    record.recompute_derived();
    record
}

fn sample_dataset() -> Dataset {
    Dataset::from_rows(vec![
        record(1, Some(40), Some(Sex::Male), Some(4), Some(150.0)),
        record(2, Some(60), Some(Sex::Female), Some(2), Some(120.0)),
        record(3, None, Some(Sex::Male), Some(4), Some(160.0)),
        record(4, Some(50), None, None, None),
    ])
}

#[test]
fn test_general_summary() {
    let report = build_report(&sample_dataset());

    assert_eq!(report.general.total_patients, 4);
    // mean over the three known ages
    assert!((report.general.mean_age - 50.0).abs() < 1e-9);
    assert_eq!(report.general.min_age, 40);
    assert_eq!(report.general.max_age, 60);
    // counted from the actual H/F codes
    assert_eq!(report.general.sex_ratio, "2:1");
}

#[test]
fn test_label_distribution_is_ordered_by_label() {
    let report = build_report(&sample_dataset());
    let entries: Vec<(u8, usize)> = report
        .label_distribution
        .iter()
        .map(|(&label, &count)| (label, count))
        .collect();
    assert_eq!(entries, vec![(2, 1), (4, 2)]);
}

#[test]
fn test_label_four_subgroup() {
    let report = build_report(&sample_dataset());

    assert_eq!(report.label_four.count, 2);
    assert!((report.label_four.pct - 50.0).abs() < 1e-9);
    // only P0001 has a known age in the subgroup
    assert!((report.label_four.mean_age - 40.0).abs() < 1e-9);
    assert_eq!(report.label_four.patient_ids, vec!["P0001", "P0003"]);
}

#[test]
fn test_health_stats() {
    let report = build_report(&sample_dataset());

    // mean systolic over known values: (150 + 120 + 160) / 3 = 143.33 -> "143"
    assert_eq!(report.health.mean_blood_pressure, "143/80");
    assert!((report.health.mean_cholesterol - 200.0).abs() < 1e-9);
    assert!((report.health.mean_glucose - 100.0).abs() < 1e-9);
    // systolic > 140: rows 1 and 3
    assert_eq!(report.health.hypertensive_patients, 2);
}

#[test]
fn test_empty_label_four_subgroup_reports_zero_mean_age() {
    let dataset = Dataset::from_rows(vec![record(
        1,
        Some(40),
        Some(Sex::Male),
        Some(1),
        Some(120.0),
    )]);
    let report = build_report(&dataset);
    assert_eq!(report.label_four.count, 0);
    assert_eq!(report.label_four.mean_age, 0.0);
    assert!(report.label_four.patient_ids.is_empty());
}

#[test]
fn test_export_writes_pretty_json_with_source_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rapport.json");

    let exported = export_report(&sample_dataset(), &path).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(
        value["resume_general"]["nombre_total_patients"],
        serde_json::json!(4)
    );
    assert_eq!(value["distribution_labels"]["4"], serde_json::json!(2));
    assert_eq!(
        value["patients_label_4"]["liste_ids"][0],
        serde_json::json!("P0001")
    );
    assert_eq!(
        value["statistiques_sante"]["tension_moyenne"],
        serde_json::json!("143/80")
    );
    // pretty printed with 2-space indentation
    assert!(content.contains("\n  \"resume_general\""));
    // the exported struct matches what the builder returns
    assert_eq!(exported, build_report(&sample_dataset()));
}
