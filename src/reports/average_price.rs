use crate::catalog::{Metric, MetricSeries};
use crate::reports::utility::rank_by_mean;
use crate::reports::{Report, ReportResult};

/// Mean price per brand, most expensive first, ties broken by brand name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragePriceReport;

impl Report for AveragePriceReport {
    fn name(&self) -> &'static str {
        "average-price"
    }

    fn metric(&self) -> Metric {
        Metric::Price
    }

    fn value_label(&self) -> &'static str {
        "Average Price"
    }

    fn generate(&self, data: &MetricSeries) -> ReportResult {
        rank_by_mean(data)
    }
}
