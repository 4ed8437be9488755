//! Descriptive statistics helpers
//!
//! Small numeric routines shared by the cleaner, analyzer and reporter.
//! Quantiles use linear interpolation and the standard deviation is the
//! sample (n-1) estimate, matching the describe-style summaries of the
//! source data tooling.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Arithmetic mean, `None` for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator), `None` for fewer than two values
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Quantile of a slice via linear interpolation, `None` for an empty slice
///
/// `q` must be in [0, 1]. The input does not need to be sorted.
#[must_use]
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(sorted[lower]);
    }
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Interpolated median (mean of the two middle values for even counts)
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Lower median of an integer slice
///
/// For even counts this returns the lower of the two middle values, so
/// the result is always a value drawn from the input. Used when imputing
/// integer columns, where an interpolated half-step would leave the
/// column's domain.
#[must_use]
pub fn lower_median(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    Some(sorted[(sorted.len() - 1) / 2])
}

/// Most frequent value, ties broken by first encounter in input order
#[must_use]
pub fn mode<T: Eq + Hash + Copy>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut counts: FxHashMap<T, (usize, usize)> = FxHashMap::default();
    for (index, value) in values.into_iter().enumerate() {
        counts
            .entry(value)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, index));
    }
    counts
        .into_iter()
        // highest count wins; among equals the earliest first occurrence
        .min_by_key(|&(_, (count, first))| (std::cmp::Reverse(count), first))
        .map(|(value, _)| value)
}

/// Describe-style summary of a numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct Describe {
    /// Number of values summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation, `None` for a single value
    pub std_dev: Option<f64>,
    /// Minimum
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum
    pub max: f64,
}

/// Summarize a numeric column, `None` for an empty slice
#[must_use]
pub fn describe(values: &[f64]) -> Option<Describe> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Some(Describe {
        count: sorted.len(),
        mean: mean(&sorted)?,
        std_dev: std_dev(&sorted),
        min: *sorted.first()?,
        q1: quantile(&sorted, 0.25)?,
        median: quantile(&sorted, 0.5)?,
        q3: quantile(&sorted, 0.75)?,
        max: *sorted.last()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(std_dev(&[5.0]), None);
        // sample std of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&values).unwrap();
        assert!((sd - 2.138_089_935).abs() < 1e-6);
    }

    #[test]
    fn test_quantile_interpolation() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_lower_median() {
        assert_eq!(lower_median(&[]), None);
        assert_eq!(lower_median(&[5]), Some(5));
        assert_eq!(lower_median(&[1, 2, 3, 4]), Some(2));
        assert_eq!(lower_median(&[4, 2, 1, 3, 5]), Some(3));
    }

    #[test]
    fn test_mode_tie_break_is_first_encountered() {
        assert_eq!(mode(Vec::<u8>::new()), None);
        assert_eq!(mode(vec![1, 2, 2, 3]), Some(2));
        // tie between 7 and 9: 9 appears first
        assert_eq!(mode(vec![9, 7, 7, 9]), Some(9));
    }

    #[test]
    fn test_describe() {
        let d = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(d.count, 4);
        assert_eq!(d.mean, 2.5);
        assert_eq!(d.min, 1.0);
        assert_eq!(d.q1, 1.75);
        assert_eq!(d.median, 2.5);
        assert_eq!(d.q3, 3.25);
        assert_eq!(d.max, 4.0);
        assert!(describe(&[]).is_none());
    }
}
