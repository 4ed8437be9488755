use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::info;
use patient_pipeline::PatientDataPipeline;
use patient_pipeline::models::{Column, LiteralValue};

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("{}", "=".repeat(30));
    println!("PATIENT DATA ANALYSIS");
    println!("{}", "=".repeat(30));

    let mut pipeline = PatientDataPipeline::new();

    // Generate and persist the dataset
    info!("Generating example data...");
    let start = Instant::now();
    let dataset = pipeline.generate(1000)?;
    info!("Generated {} patients in {:?}", dataset.len(), start.elapsed());

    println!("\nData preview:");
    println!("{}", pipeline.preview(5)?);

    let csv_path = Path::new("donnees_patients.csv");
    pipeline
        .save(csv_path)
        .with_context(|| format!("saving dataset to {}", csv_path.display()))?;

    // Clean
    info!("Cleaning data...");
    pipeline.clean()?;

    // Analyze the label-4 subgroup
    let analysis = pipeline.analyze(Column::Label, &LiteralValue::Int(4))?;
    println!("\n{}", analysis.summary);

    // Report
    info!("Building report...");
    let report = pipeline.export_report(Path::new("rapport_analyse.json"))?;

    println!("\nReport summary:");
    println!(
        "  - Total patients:      {}",
        report.general.total_patients
    );
    println!("  - Mean age:            {:.1} years", report.general.mean_age);
    println!(
        "  - Label 4 patients:    {} ({:.1}%)",
        report.label_four.count, report.label_four.pct
    );
    println!(
        "  - Hypertensive:        {}",
        report.health.hypertensive_patients
    );

    Ok(())
}
