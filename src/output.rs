//! Output formatting and persistence for generated reports.
//!
//! Supports a grid table for terminals, JSON, and CSV.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::io::Write;
use tabled::builder::Builder;
use tabled::settings::{Alignment, Style, object::Columns};
use tracing::debug;

use crate::reports::{Report, ReportResult};

pub const KEY_HEADER: &str = "Brand";

/// One ranked line of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub brand: String,
    pub value: f64,
}

/// A generated report ready to be rendered.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub report: String,
    pub title: String,
    pub value_label: String,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
}

impl ReportOutput {
    pub fn new(report: &dyn Report, result: ReportResult) -> Self {
        Self {
            report: report.name().to_string(),
            title: report.title(),
            value_label: report.value_label().to_string(),
            generated_at: Utc::now(),
            rows: result
                .into_iter()
                .map(|(brand, value)| ReportRow { brand, value })
                .collect(),
        }
    }
}

/// Formats a value for display with exactly two fractional digits.
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

/// Renders the title followed by a grid table.
pub fn render_table(output: &ReportOutput) -> String {
    let mut builder = Builder::default();
    builder.push_record([KEY_HEADER.to_string(), output.value_label.clone()]);
    for row in &output.rows {
        builder.push_record([row.brand.clone(), format_value(row.value)]);
    }

    let mut table = builder.build();
    // brand column left-aligned, values right-aligned
    table
        .with(Style::ascii())
        .modify(Columns::new(1..), Alignment::right());

    format!("{}\n\n{table}\n", output.title)
}

/// Serializes the report as pretty-printed JSON.
pub fn render_json(output: &ReportOutput) -> Result<String> {
    let mut text = serde_json::to_string_pretty(output)?;
    text.push('\n');
    Ok(text)
}

/// Writes the report rows as CSV, with a header line, to `writer`.
pub fn write_csv<W: Write>(writer: W, output: &ReportOutput) -> Result<()> {
    debug!(rows = output.rows.len(), "Writing CSV report");

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record([KEY_HEADER, output.value_label.as_str()])?;
    for row in &output.rows {
        writer.write_record([row.brand.as_str(), format_value(row.value).as_str()])?;
    }
    writer.flush()?;

    Ok(())
}

/// Renders the report as CSV text.
pub fn render_csv(output: &ReportOutput) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, output)?;
    Ok(String::from_utf8(buf)?)
}
