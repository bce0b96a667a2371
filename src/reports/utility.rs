use std::cmp::Ordering;

use crate::catalog::MetricSeries;
use crate::reports::ReportResult;

/// Sort direction for [`sort_by_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn safe_average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Orders `(key, value)` pairs by value only.
///
/// The sort is stable, so equal values keep their input order; no
/// secondary key is applied.
pub fn sort_by_value<I, K>(data: I, order: SortOrder) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (K, f64)>,
    K: Into<String>,
{
    let mut pairs: Vec<(String, f64)> = data.into_iter().map(|(k, v)| (k.into(), v)).collect();
    pairs.sort_by(|a, b| match order {
        SortOrder::Ascending => a.1.total_cmp(&b.1),
        SortOrder::Descending => b.1.total_cmp(&a.1),
    });
    pairs
}

/// Ranks brands by the mean of their values: highest mean first, ties by
/// brand name ascending. Brands without values are left out.
pub fn rank_by_mean(data: &MetricSeries) -> ReportResult {
    let mut ranked: ReportResult = data
        .iter()
        .filter_map(|(brand, values)| safe_average(values).map(|avg| (brand.clone(), avg)))
        .collect();

    ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    ranked
}
