//! Multi-file CSV loading with partial-failure tolerance.
//!
//! Each file is read in full and decoded before parsing. Missing,
//! unreadable, undecodable, or header-less files are skipped; bad rows are
//! skipped individually. Every skipped item is logged where it happens and
//! recorded as a [`LoadIssue`] in the returned [`LoadSummary`].

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::catalog::BrandCatalog;
use crate::error::{CatalogError, FileError, LoadIssue};
use crate::parser::{ColumnIndex, TextEncoding, parse_row};

/// Records accepted from a single file.
#[derive(Debug, Default)]
pub struct FileLoad {
    pub catalog: BrandCatalog,
    pub rows_loaded: usize,
    pub rejected: Vec<LoadIssue>,
}

/// Outcome of loading an ordered set of files.
#[derive(Debug, Default)]
pub struct LoadSummary {
    pub catalog: BrandCatalog,
    pub rows_loaded: usize,
    pub files_loaded: usize,
    pub issues: Vec<LoadIssue>,
}

impl LoadSummary {
    fn absorb(mut self, outcome: Result<FileLoad, FileError>) -> Self {
        match outcome {
            Ok(file) => {
                self.catalog.extend(file.catalog);
                self.rows_loaded += file.rows_loaded;
                self.files_loaded += 1;
                self.issues.extend(file.rejected);
            }
            Err(e) => self.issues.push(e.into()),
        }
        self
    }
}

/// Reads one CSV file into a fresh [`FileLoad`].
///
/// Nothing from the file is kept if it cannot be read or decoded. The CSV
/// reader is flexible and runs over decoded text, so row-length and UTF-8
/// errors cannot occur; any other CSV error discards the file as
/// [`FileError::MalformedInput`].
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.display(), encoding = %encoding))]
pub fn load_file(path: &Path, encoding: TextEncoding) -> Result<FileLoad, FileError> {
    if !path.is_file() {
        return Err(FileError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| FileError::from_io(path.to_path_buf(), e))?;
    let text = encoding
        .decode(&bytes)
        .map_err(|offset| FileError::DecodeFailure {
            path: path.to_path_buf(),
            encoding: encoding.label(),
            offset,
        })?;

    let malformed = |source: csv::Error| FileError::MalformedInput {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(malformed)?.clone();
    if headers.is_empty() {
        return Err(FileError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let columns = ColumnIndex::from_headers(&headers);
    let missing = columns.missing();
    if !missing.is_empty() {
        warn!(
            path = %path.display(),
            ?missing,
            "Header lacks required columns, rows will be rejected"
        );
    }

    let mut load = FileLoad::default();

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(malformed)?;
        // header occupies row 1
        let row = idx + 2;

        match parse_row(&columns, &record) {
            Ok((brand, product)) => {
                load.catalog.push(brand, product);
                load.rows_loaded += 1;
            }
            Err(reason) => {
                warn!(path = %path.display(), row, reason = %reason, "Row rejected");
                load.rejected.push(LoadIssue::RowRejected {
                    path: path.to_path_buf(),
                    row,
                    reason,
                });
            }
        }
    }

    debug!(
        rows_loaded = load.rows_loaded,
        rejected = load.rejected.len(),
        "File loaded"
    );

    Ok(load)
}

/// Loads every path in order, folding per-file outcomes into a [`LoadSummary`].
///
/// Never fails: file and row problems end up in [`LoadSummary::issues`].
pub fn load_catalog_with_summary<P: AsRef<Path>>(
    paths: &[P],
    encoding: TextEncoding,
) -> LoadSummary {
    paths.iter().fold(LoadSummary::default(), |summary, path| {
        let outcome = load_file(path.as_ref(), encoding);
        if let Err(e) = &outcome {
            warn!(path = %e.path().display(), error = %e, "File skipped");
        }
        summary.absorb(outcome)
    })
}

/// Loads products from CSV files and groups them by brand.
///
/// # Errors
///
/// Returns [`CatalogError::EmptyResult`] when no row was loaded from any
/// file and `raise_on_empty` is set. Otherwise an empty catalog is returned.
#[tracing::instrument(level = "debug", skip_all, fields(files = paths.len(), raise_on_empty = raise_on_empty))]
pub fn load_catalog<P: AsRef<Path>>(
    paths: &[P],
    encoding: TextEncoding,
    raise_on_empty: bool,
) -> Result<BrandCatalog, CatalogError> {
    let summary = load_catalog_with_summary(paths, encoding);

    if summary.rows_loaded == 0 {
        if raise_on_empty {
            return Err(CatalogError::EmptyResult { files: paths.len() });
        }
        return Ok(summary.catalog);
    }

    info!(
        rows_loaded = summary.rows_loaded,
        files_loaded = summary.files_loaded,
        brands = summary.catalog.len(),
        "Loaded product rows"
    );

    Ok(summary.catalog)
}
