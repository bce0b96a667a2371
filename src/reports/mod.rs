//! Report generation over brand-grouped metrics.
//!
//! A [`Report`] turns `{brand: [value]}` into a ranked list of
//! `(brand, value)` pairs. Reports are looked up by name in a
//! [`ReportRegistry`], which is built once and shared read-only.

pub mod average_price;
pub mod average_rating;
pub mod utility;

pub use average_price::AveragePriceReport;
pub use average_rating::AverageRatingReport;

use crate::catalog::{Metric, MetricSeries};
use crate::error::ReportError;

/// Ranked `(key, value)` pairs produced by a report.
pub type ReportResult = Vec<(String, f64)>;

/// A stateless transformer from grouped values to a ranked result.
pub trait Report: Send + Sync {
    /// Registry name, e.g. `average-rating`.
    fn name(&self) -> &'static str;

    /// Which field of each product record the report consumes.
    fn metric(&self) -> Metric;

    /// Column header for the value column.
    fn value_label(&self) -> &'static str;

    fn generate(&self, data: &MetricSeries) -> ReportResult;

    /// Human-readable title, e.g. `AVERAGE RATING`.
    fn title(&self) -> String {
        self.name().to_uppercase().replace('-', " ")
    }
}

/// Closed table of available reports, in registration order.
pub struct ReportRegistry {
    reports: Vec<Box<dyn Report>>,
}

impl ReportRegistry {
    pub fn empty() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    /// Appends a report. Lookups return the first report registered under a name.
    pub fn with(mut self, report: impl Report + 'static) -> Self {
        self.reports.push(Box::new(report));
        self
    }

    /// Registered report names, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.reports.iter().map(|r| r.name()).collect()
    }

    /// # Errors
    ///
    /// Returns [`ReportError::UnknownReport`] listing the valid names when
    /// `name` is not registered.
    pub fn get(&self, name: &str) -> Result<&dyn Report, ReportError> {
        self.reports
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
            .ok_or_else(|| ReportError::UnknownReport {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::empty()
            .with(AverageRatingReport)
            .with(AveragePriceReport)
    }
}
