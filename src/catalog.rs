//! Product records grouped by brand.

use indexmap::IndexMap;

/// Brand name to the values of one metric, in catalog order.
pub type MetricSeries = IndexMap<String, Vec<f64>>;

/// A single validated observation for a brand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRecord {
    pub rating: f64,
    pub price: f64,
}

/// The numeric field a report consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Rating,
    Price,
}

impl Metric {
    pub fn extract(self, record: &ProductRecord) -> f64 {
        match self {
            Metric::Rating => record.rating,
            Metric::Price => record.price,
        }
    }
}

/// Records keyed by trimmed, case-sensitive brand name.
///
/// Brands keep first-seen order; each brand's records keep file-then-row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandCatalog {
    brands: IndexMap<String, Vec<ProductRecord>>,
}

impl BrandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, brand: String, record: ProductRecord) {
        self.brands.entry(brand).or_default().push(record);
    }

    /// Appends every record of `other`, brand by brand.
    pub(crate) fn extend(&mut self, other: BrandCatalog) {
        for (brand, records) in other.brands {
            self.brands.entry(brand).or_default().extend(records);
        }
    }

    pub fn get(&self, brand: &str) -> Option<&[ProductRecord]> {
        self.brands.get(brand).map(Vec::as_slice)
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ProductRecord])> {
        self.brands.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of distinct brands.
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.brands.values().map(Vec::len).sum()
    }

    /// Reshapes the catalog into `{brand: [metric value]}` for report generation.
    pub fn project(&self, metric: Metric) -> MetricSeries {
        self.brands
            .iter()
            .map(|(brand, records)| {
                let values = records.iter().map(|r| metric.extract(r)).collect();
                (brand.clone(), values)
            })
            .collect()
    }
}

impl FromIterator<(String, ProductRecord)> for BrandCatalog {
    fn from_iter<I: IntoIterator<Item = (String, ProductRecord)>>(iter: I) -> Self {
        let mut catalog = BrandCatalog::new();
        for (brand, record) in iter {
            catalog.push(brand, record);
        }
        catalog
    }
}
