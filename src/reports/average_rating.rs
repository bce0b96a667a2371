//! Average rating per brand.

use crate::catalog::{Metric, MetricSeries};
use crate::reports::utility::rank_by_mean;
use crate::reports::{Report, ReportResult};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Mean rating per brand, highest first, ties broken by brand name.
///
/// Ratings are averaged as given. Use [`retain_valid_ratings`] beforehand to
/// drop values outside `[MIN_RATING, MAX_RATING]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageRatingReport;

impl AverageRatingReport {
    pub fn is_valid_rating(rating: f64) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&rating)
    }
}

impl Report for AverageRatingReport {
    fn name(&self) -> &'static str {
        "average-rating"
    }

    fn metric(&self) -> Metric {
        Metric::Rating
    }

    fn value_label(&self) -> &'static str {
        "Average Rating"
    }

    fn generate(&self, data: &MetricSeries) -> ReportResult {
        rank_by_mean(data)
    }
}

/// Drops ratings outside the valid range, and brands left with none.
pub fn retain_valid_ratings(data: &MetricSeries) -> MetricSeries {
    data.iter()
        .filter_map(|(brand, ratings)| {
            let valid: Vec<f64> = ratings
                .iter()
                .copied()
                .filter(|&r| AverageRatingReport::is_valid_rating(r))
                .collect();
            (!valid.is_empty()).then(|| (brand.clone(), valid))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn series(entries: Vec<(&str, Vec<f64>)>) -> MetricSeries {
        entries
            .into_iter()
            .map(|(brand, values)| (brand.to_string(), values))
            .collect()
    }

    fn sample_ratings() -> MetricSeries {
        series(vec![
            ("apple", vec![4.9, 4.8]),
            ("samsung", vec![4.8, 4.7, 4.6]),
            ("xiaomi", vec![4.6]),
        ])
    }

    #[test]
    fn test_average_rating_calculation() {
        let result = AverageRatingReport.generate(&sample_ratings());

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].0, "apple");
        assert!((result[0].1 - 4.85).abs() < 1e-9);
        assert_eq!(result[1].0, "samsung");
        assert!((result[1].1 - 4.7).abs() < 0.01);
        assert_eq!(result[2], ("xiaomi".to_string(), 4.6));
    }

    #[test]
    fn test_equal_means_sorted_by_brand() {
        let data = series(vec![
            ("xiaomi", vec![4.5, 4.5]),
            ("apple", vec![4.5, 4.5]),
            ("samsung", vec![4.5, 4.5]),
        ]);

        let brands: Vec<String> = AverageRatingReport
            .generate(&data)
            .into_iter()
            .map(|(brand, _)| brand)
            .collect();

        assert_eq!(brands, vec!["apple", "samsung", "xiaomi"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(AverageRatingReport.generate(&IndexMap::new()).is_empty());
    }

    #[test]
    fn test_brand_without_ratings_is_omitted() {
        let data = series(vec![("apple", vec![]), ("lg", vec![3.0])]);
        assert_eq!(
            AverageRatingReport.generate(&data),
            vec![("lg".to_string(), 3.0)]
        );
    }

    #[test]
    fn test_out_of_range_ratings_pass_through() {
        let data = series(vec![("odd", vec![7.0, 9.0]), ("fine", vec![5.0])]);
        let result = AverageRatingReport.generate(&data);
        assert_eq!(result[0], ("odd".to_string(), 8.0));
    }

    #[test]
    fn test_is_valid_rating_boundaries() {
        assert!(AverageRatingReport::is_valid_rating(0.0));
        assert!(AverageRatingReport::is_valid_rating(4.5));
        assert!(AverageRatingReport::is_valid_rating(5.0));
        assert!(!AverageRatingReport::is_valid_rating(-0.0001));
        assert!(!AverageRatingReport::is_valid_rating(5.0001));
        assert!(!AverageRatingReport::is_valid_rating(f64::NAN));
    }

    #[test]
    fn test_retain_valid_ratings() {
        let data = series(vec![("odd", vec![7.0, 4.0]), ("bad", vec![-1.0]), ("ok", vec![5.0])]);
        let filtered = retain_valid_ratings(&data);

        assert_eq!(filtered, series(vec![("odd", vec![4.0]), ("ok", vec![5.0])]));
    }
}
