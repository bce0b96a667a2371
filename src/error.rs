//! Error types for loading product data and looking up reports.
//!
//! Row and file problems ([`RowError`], [`FileError`]) are absorbed by the
//! loader and surfaced as [`LoadIssue`]s. Only [`CatalogError`] and
//! [`ReportError`] terminate an operation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single CSV row was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RowError {
    /// The header has no column with this name, or the row is too short to reach it.
    #[error("column not found: {0}")]
    MissingColumn(&'static str),

    /// The brand cell is empty after trimming.
    #[error("brand is empty")]
    EmptyBrand,

    /// A numeric cell is not a finite decimal number.
    #[error("invalid number in column {column}: {value:?}")]
    InvalidNumber { column: &'static str, value: String },
}

/// A file that was skipped entirely.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {} as {encoding}: invalid byte at offset {offset}", path.display())]
    DecodeFailure {
        path: PathBuf,
        encoding: &'static str,
        offset: usize,
    },

    #[error("no header row in {}", path.display())]
    NoHeader { path: PathBuf },

    #[error("malformed CSV in {}: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    /// Classifies an I/O error raised while opening or reading `path`.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => FileError::MissingFile { path },
            std::io::ErrorKind::PermissionDenied => FileError::AccessDenied { path, source },
            _ => FileError::Io { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            FileError::MissingFile { path }
            | FileError::AccessDenied { path, .. }
            | FileError::DecodeFailure { path, .. }
            | FileError::NoHeader { path }
            | FileError::MalformedInput { path, .. }
            | FileError::Io { path, .. } => path,
        }
    }
}

/// A recovered problem recorded while loading a set of files.
#[derive(Error, Debug)]
pub enum LoadIssue {
    #[error(transparent)]
    File(#[from] FileError),

    /// `row` is 1-based and counts the header line.
    #[error("{}:{row} - {reason}", path.display())]
    RowRejected {
        path: PathBuf,
        row: usize,
        reason: RowError,
    },
}

/// Failures of the multi-file load as a whole.
#[derive(Error, Debug, PartialEq)]
pub enum CatalogError {
    #[error("no product rows were loaded from {files} file(s)")]
    EmptyResult { files: usize },
}

/// Failures of report lookup.
#[derive(Error, Debug, PartialEq)]
pub enum ReportError {
    #[error("unknown report: {name}. Available: {}", available.join(", "))]
    UnknownReport {
        name: String,
        available: Vec<String>,
    },
}

/// A text encoding label that is not supported.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unsupported encoding: {0}")]
pub struct UnknownEncoding(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_classifies_kinds() {
        let path = PathBuf::from("data.csv");

        let err = FileError::from_io(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FileError::MissingFile { .. }));

        let err = FileError::from_io(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, FileError::AccessDenied { .. }));

        let err = FileError::from_io(path, std::io::Error::other("disk on fire"));
        assert!(matches!(err, FileError::Io { .. }));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_row_rejected_display() {
        let issue = LoadIssue::RowRejected {
            path: PathBuf::from("phones.csv"),
            row: 3,
            reason: RowError::InvalidNumber {
                column: "rating",
                value: "abc".to_string(),
            },
        };
        assert_eq!(
            issue.to_string(),
            "phones.csv:3 - invalid number in column rating: \"abc\""
        );
    }

    #[test]
    fn test_unknown_report_lists_alternatives() {
        let err = ReportError::UnknownReport {
            name: "nonexistent-report".to_string(),
            available: vec!["average-rating".to_string(), "average-price".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown report: nonexistent-report. Available: average-rating, average-price"
        );
    }

    #[test]
    fn test_empty_result_display() {
        let err = CatalogError::EmptyResult { files: 2 };
        assert_eq!(err.to_string(), "no product rows were loaded from 2 file(s)");
    }
}
