//! Filter-and-describe analysis of a cleaned dataset
//!
//! `analyze` selects the rows where one column equals a target value and
//! summarizes the subset: descriptive statistics for the stat columns,
//! group-vs-population mean comparisons, sex distribution and the
//! highest-BMI patients. The summary implements `Display` in the layout
//! of the source report text.

use std::fmt;

use itertools::Itertools;

use crate::dataset::Dataset;
use crate::models::{Column, LiteralValue, Sex};
use crate::stats::{self, Describe};

/// Group mean against the population mean for one column
#[derive(Debug, Clone, PartialEq)]
pub struct GroupComparison {
    /// Column being compared
    pub column: Column,
    /// Mean over the filtered subset
    pub group_mean: f64,
    /// Mean over the whole dataset
    pub population_mean: f64,
    /// Percent difference of the group mean from the population mean
    pub pct_difference: f64,
}

/// Count and share of one sex within the subset
#[derive(Debug, Clone, PartialEq)]
pub struct SexCount {
    /// Sex being counted
    pub sex: Sex,
    /// Number of subset rows with this sex
    pub count: usize,
    /// Percentage of the subset
    pub pct: f64,
}

/// One entry of the top-BMI ranking
#[derive(Debug, Clone, PartialEq)]
pub struct BmiEntry {
    /// Patient identifier
    pub patient_id: String,
    /// BMI value
    pub bmi: f64,
}

/// Statistics computed only when the subset is non-empty
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisDetail {
    /// Describe summary per stat column, in stat-column order
    pub stats: Vec<(Column, Describe)>,
    /// Group-vs-population comparisons for age, BMI and systolic pressure
    pub comparisons: Vec<GroupComparison>,
    /// Sex distribution of the subset, most frequent first
    pub sex_distribution: Vec<SexCount>,
    /// Up to five rows with the highest BMI, descending
    pub top_bmi: Vec<BmiEntry>,
}

/// Result of a filter-and-describe analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Column the dataset was filtered on
    pub column: Column,
    /// Value the column was matched against
    pub value: LiteralValue,
    /// Number of matching rows
    pub matched: usize,
    /// Size of the dataset the filter ran over
    pub total: usize,
    /// Matching rows as a percentage of the dataset
    pub pct_of_total: f64,
    /// Statistics block, absent when nothing matched
    pub detail: Option<AnalysisDetail>,
}

/// Filtered subset plus its summary
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// The matching rows, in original row order
    pub subset: Dataset,
    /// Descriptive summary of the subset
    pub summary: AnalysisSummary,
}

/// Up to `limit` rows with the highest BMI, descending, ties keeping row order
fn top_bmi(subset: &Dataset, limit: usize) -> Vec<BmiEntry> {
    subset
        .iter()
        .filter_map(|r| {
            r.bmi.map(|bmi| BmiEntry {
                patient_id: r.patient_id.clone(),
                bmi,
            })
        })
        // sorted_by is stable, so equal BMIs keep their original order
        .sorted_by(|a, b| b.bmi.total_cmp(&a.bmi))
        .take(limit)
        .collect()
}

fn sex_distribution(subset: &Dataset) -> Vec<SexCount> {
    let total = subset.len();
    [Sex::Male, Sex::Female]
        .into_iter()
        .map(|sex| {
            let count = subset.iter().filter(|r| r.sex == Some(sex)).count();
            SexCount {
                sex,
                count,
                pct: count as f64 / total as f64 * 100.0,
            }
        })
        .filter(|entry| entry.count > 0)
        .sorted_by_key(|entry| std::cmp::Reverse(entry.count))
        .collect()
}

fn comparisons(subset: &Dataset, dataset: &Dataset) -> Vec<GroupComparison> {
    Column::COMPARED
        .into_iter()
        .filter_map(|column| {
            let group_mean = stats::mean(&subset.numeric_values(column))?;
            let population_mean = stats::mean(&dataset.numeric_values(column))?;
            Some(GroupComparison {
                column,
                group_mean,
                population_mean,
                pct_difference: (group_mean - population_mean) / population_mean * 100.0,
            })
        })
        .collect()
}

/// Filter a cleaned dataset on `column == value` and describe the subset
///
/// Missing cells never match. An empty subset is returned gracefully
/// with no statistics block.
#[must_use]
pub fn analyze(dataset: &Dataset, column: Column, value: &LiteralValue) -> Analysis {
    let subset = Dataset::from_rows(
        dataset
            .iter()
            .filter(|r| column.matches(r, value))
            .cloned()
            .collect(),
    );

    let matched = subset.len();
    let total = dataset.len();
    let pct_of_total = if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64 * 100.0
    };

    let detail = (!subset.is_empty()).then(|| AnalysisDetail {
        stats: Column::STATS
            .into_iter()
            .filter_map(|col| stats::describe(&subset.numeric_values(col)).map(|d| (col, d)))
            .collect(),
        comparisons: comparisons(&subset, dataset),
        sex_distribution: sex_distribution(&subset),
        top_bmi: top_bmi(&subset, 5),
    });

    Analysis {
        subset,
        summary: AnalysisSummary {
            column,
            value: value.clone(),
            matched,
            total,
            pct_of_total,
            detail,
        },
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis of patients with {} = {}", self.column, self.value)?;
        writeln!(f, "{}", "-".repeat(30))?;
        writeln!(f, "Patient count:      {}", self.matched)?;
        writeln!(f, "Percentage of total: {:.1}%", self.pct_of_total)?;

        let Some(detail) = &self.detail else {
            return Ok(());
        };

        writeln!(f, "\nStatistics for '{} = {}':", self.column, self.value)?;
        writeln!(
            f,
            "{:<20} {:>7} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        for (column, d) in &detail.stats {
            let std_dev = d
                .std_dev
                .map_or_else(|| "NaN".to_string(), |s| format!("{s:.2}"));
            writeln!(
                f,
                "{:<20} {:>7} {:>9.2} {:>9} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
                column.name(),
                d.count,
                d.mean,
                std_dev,
                d.min,
                d.q1,
                d.median,
                d.q3,
                d.max
            )?;
        }

        writeln!(f, "\nComparison with the general population:")?;
        for cmp in &detail.comparisons {
            writeln!(f, "  {}:", cmp.column)?;
            writeln!(f, "     - group mean      = {:.2}", cmp.group_mean)?;
            writeln!(f, "     - population mean = {:.2}", cmp.population_mean)?;
            writeln!(f, "     - difference      = {:+.2}%", cmp.pct_difference)?;
        }

        writeln!(f, "\nSex distribution:")?;
        for entry in &detail.sex_distribution {
            writeln!(
                f,
                "  {}: {} patients ({:.1}%)",
                entry.sex, entry.count, entry.pct
            )?;
        }

        writeln!(f, "\nTop 5 patients by BMI:")?;
        for entry in &detail.top_bmi {
            writeln!(f, "  {} {:>7.2}", entry.patient_id, entry.bmi)?;
        }
        Ok(())
    }
}
