//! Row-level parsing of product CSV data.
//!
//! Decodes raw file bytes into text and turns one CSV record into a
//! brand plus [`ProductRecord`], or a [`RowError`] explaining the rejection.

use std::fmt;
use std::str::FromStr;

use csv::StringRecord;

use crate::catalog::ProductRecord;
use crate::error::{RowError, UnknownEncoding};

pub const BRAND_COLUMN: &str = "brand";
pub const RATING_COLUMN: &str = "rating";
pub const PRICE_COLUMN: &str = "price";

/// Text encodings accepted for input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Latin1,
    Ascii,
}

impl TextEncoding {
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Ascii => "ascii",
        }
    }

    /// Decodes `bytes`, returning the offset of the first invalid byte on failure.
    ///
    /// A leading UTF-8 byte order mark is dropped.
    pub fn decode(self, bytes: &[u8]) -> Result<String, usize> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
                let skipped = bytes.len() - body.len();
                std::str::from_utf8(body)
                    .map(str::to_owned)
                    .map_err(|e| skipped + e.valid_up_to())
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(offset),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }
}

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    brand: Option<usize>,
    rating: Option<usize>,
    price: Option<usize>,
}

impl ColumnIndex {
    /// Resolves required columns by exact name. Extra columns are ignored.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            brand: find(BRAND_COLUMN),
            rating: find(RATING_COLUMN),
            price: find(PRICE_COLUMN),
        }
    }

    /// Required columns that the header does not provide.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (BRAND_COLUMN, self.brand),
            (RATING_COLUMN, self.rating),
            (PRICE_COLUMN, self.price),
        ]
        .into_iter()
        .filter_map(|(name, idx)| idx.is_none().then_some(name))
        .collect()
    }
}

/// Parses one data row into its trimmed brand and record.
pub fn parse_row(
    columns: &ColumnIndex,
    record: &StringRecord,
) -> Result<(String, ProductRecord), RowError> {
    let brand = field(record, columns.brand, BRAND_COLUMN)?.trim();
    if brand.is_empty() {
        return Err(RowError::EmptyBrand);
    }

    let rating = parse_number(field(record, columns.rating, RATING_COLUMN)?, RATING_COLUMN)?;
    let price = parse_number(field(record, columns.price, PRICE_COLUMN)?, PRICE_COLUMN)?;

    Ok((brand.to_string(), ProductRecord { rating, price }))
}

fn field<'r>(
    record: &'r StringRecord,
    idx: Option<usize>,
    column: &'static str,
) -> Result<&'r str, RowError> {
    idx.and_then(|i| record.get(i))
        .ok_or(RowError::MissingColumn(column))
}

/// Parses a decimal cell. Integers are accepted; `inf` and `nan` are not.
pub fn parse_number(value: &str, column: &'static str) -> Result<f64, RowError> {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(RowError::InvalidNumber {
            column,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> StringRecord {
        StringRecord::from(vec!["name", "brand", "price", "rating"])
    }

    #[test]
    fn test_parse_row_valid() {
        let columns = ColumnIndex::from_headers(&headers());
        let row = StringRecord::from(vec!["iphone 15 pro", "  apple ", "999", "4.9"]);

        let (brand, record) = parse_row(&columns, &row).unwrap();

        assert_eq!(brand, "apple");
        assert_eq!(record, ProductRecord { rating: 4.9, price: 999.0 });
    }

    #[test]
    fn test_parse_row_missing_brand_column() {
        let columns = ColumnIndex::from_headers(&StringRecord::from(vec!["rating", "price"]));
        let row = StringRecord::from(vec!["4.9", "999"]);

        assert_eq!(
            parse_row(&columns, &row),
            Err(RowError::MissingColumn("brand"))
        );
    }

    #[test]
    fn test_parse_row_short_record() {
        let columns = ColumnIndex::from_headers(&headers());
        let row = StringRecord::from(vec!["galaxy", "samsung", "1199"]);

        assert_eq!(
            parse_row(&columns, &row),
            Err(RowError::MissingColumn("rating"))
        );
    }

    #[test]
    fn test_parse_row_non_numeric_rating() {
        let columns = ColumnIndex::from_headers(&headers());
        let row = StringRecord::from(vec!["redmi", "xiaomi", "199", "good"]);

        assert_eq!(
            parse_row(&columns, &row),
            Err(RowError::InvalidNumber {
                column: "rating",
                value: "good".to_string()
            })
        );
    }

    #[test]
    fn test_parse_row_blank_brand() {
        let columns = ColumnIndex::from_headers(&headers());
        let row = StringRecord::from(vec!["x", "   ", "199", "4.1"]);

        assert_eq!(parse_row(&columns, &row), Err(RowError::EmptyBrand));
    }

    #[test]
    fn test_parse_number_rules() {
        assert_eq!(parse_number("999", "price"), Ok(999.0));
        assert_eq!(parse_number(" 4.5 ", "rating"), Ok(4.5));
        assert_eq!(parse_number("-1e2", "price"), Ok(-100.0));
        assert!(parse_number("", "price").is_err());
        assert!(parse_number("inf", "price").is_err());
        assert!(parse_number("NaN", "rating").is_err());
    }

    #[test]
    fn test_missing_columns() {
        let columns = ColumnIndex::from_headers(&StringRecord::from(vec!["brand", "cost"]));
        assert_eq!(columns.missing(), vec!["rating", "price"]);
        assert!(ColumnIndex::from_headers(&headers()).missing().is_empty());
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!("UTF-8".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("utf_8_sig".parse::<TextEncoding>(), Ok(TextEncoding::Utf8));
        assert_eq!("ISO-8859-1".parse::<TextEncoding>(), Ok(TextEncoding::Latin1));
        assert_eq!("ascii".parse::<TextEncoding>(), Ok(TextEncoding::Ascii));
        assert_eq!(
            "cp1251".parse::<TextEncoding>(),
            Err(UnknownEncoding("cp1251".to_string()))
        );
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            TextEncoding::Utf8.decode(b"\xEF\xBB\xBFbrand").as_deref(),
            Ok("brand")
        );
        assert_eq!(TextEncoding::Utf8.decode(b"ab\xFFcd"), Err(2));
        assert_eq!(TextEncoding::Latin1.decode(b"caf\xE9").as_deref(), Ok("café"));
        assert_eq!(TextEncoding::Ascii.decode(b"caf\xE9"), Err(3));
    }
}
