//! CLI entry point for the brand rater.
//!
//! Loads product CSV files, groups them by brand, and prints a ranked report.

use anyhow::{Context, Result};
use brand_rater::error::UnknownEncoding;
use brand_rater::output::{ReportOutput, render_csv, render_json, render_table};
use brand_rater::reports::average_rating::retain_valid_ratings;
use brand_rater::{
    CatalogError, Metric, ReportError, ReportRegistry, TextEncoding, load_catalog,
};
use clap::{Parser, ValueEnum};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "brand_rater")]
#[command(about = "Rank brands from product CSV files", long_about = None)]
#[command(after_help = "Example: brand_rater --files phones.csv --report average-rating")]
struct Cli {
    /// Paths to CSV files with brand, rating and price columns
    #[arg(long, value_name = "FILE", num_args = 1.., required_unless_present = "list_reports")]
    files: Vec<PathBuf>,

    /// Report to generate (see --list-reports)
    #[arg(long, required_unless_present = "list_reports")]
    report: Option<String>,

    /// Text encoding of the input files
    #[arg(long, default_value = "utf-8")]
    encoding: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print an empty report instead of failing when no rows were loaded
    #[arg(long, default_value_t = false)]
    allow_empty: bool,

    /// Ignore ratings outside 0.0..=5.0 before averaging
    #[arg(long, default_value_t = false)]
    valid_only: bool,

    /// List available reports and exit
    #[arg(long, default_value_t = false)]
    list_reports: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing();

    let cli = Cli::parse();
    let registry = ReportRegistry::default();

    match run(&cli, &registry) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "Run failed");
            eprintln!("{}", describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Filter from `directives`, falling back to `default` when unset or empty.
fn log_filter(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Logging setup: colored stderr, plus a JSON rolling log file when
/// `LOG_FILE_PATH` is set.
fn init_tracing() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(log_filter(
            std::env::var("RUST_LOG").ok().as_deref(),
            LevelFilter::INFO,
        ));

    let (json_layer, file_guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let path = Path::new(&log_file_path);
            let log_dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let log_file_name = path.file_name().unwrap_or(OsStr::new("brand_rater.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(log_filter(
                    std::env::var("RUST_LOG_JSON").ok().as_deref(),
                    LevelFilter::DEBUG,
                ));
            (Some(layer), Some(file_guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn run(cli: &Cli, registry: &ReportRegistry) -> Result<()> {
    if cli.list_reports {
        let mut stdout = std::io::stdout().lock();
        for name in registry.names() {
            writeln!(stdout, "{name}")?;
        }
        return Ok(());
    }

    let report_name = cli.report.as_deref().context("--report is required")?;
    let report = registry.get(report_name)?;
    let encoding: TextEncoding = cli.encoding.parse()?;

    let catalog = load_catalog(&cli.files, encoding, !cli.allow_empty)?;

    let mut data = catalog.project(report.metric());
    if cli.valid_only && report.metric() == Metric::Rating {
        data = retain_valid_ratings(&data);
    }

    let result = report.generate(&data);
    let output = ReportOutput::new(report, result);

    let rendered = match cli.format {
        OutputFormat::Table => render_table(&output),
        OutputFormat::Json => render_json(&output)?,
        OutputFormat::Csv => render_csv(&output)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!(path = %path.display(), rows = output.rows.len(), "Report written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Maps a failure to a single human-readable line.
fn describe_error(err: &anyhow::Error) -> String {
    if let Some(e) = err.downcast_ref::<CatalogError>() {
        format!("Data error: {e}")
    } else if let Some(e) = err.downcast_ref::<ReportError>() {
        format!("Report error: {e}")
    } else if let Some(e) = err.downcast_ref::<UnknownEncoding>() {
        format!("Encoding error: {e}")
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        format!("I/O error: {err:#}")
    } else {
        format!("Error: {err:#}")
    }
}
