pub mod catalog;
pub mod error;
pub mod loader;
pub mod output;
pub mod parser;
pub mod reports;

pub use catalog::{BrandCatalog, Metric, MetricSeries, ProductRecord};
pub use error::{CatalogError, FileError, LoadIssue, ReportError, RowError};
pub use loader::{LoadSummary, load_catalog, load_catalog_with_summary};
pub use parser::TextEncoding;
pub use reports::{Report, ReportRegistry, ReportResult};
