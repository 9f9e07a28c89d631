//! Display utilities and output plumbing for the chicama CLI.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use chicama_lib::prelude::*;

/// Output format for fetched data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Converts to the library's format identifier.
    pub(crate) const fn to_output(self) -> OutputFormat {
        match self {
            Self::Csv => OutputFormat::Csv,
            Self::Json => OutputFormat::Json,
            Self::Ndjson => OutputFormat::Ndjson,
            Self::Parquet => OutputFormat::Parquet,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_output())
    }
}

/// Parse a YYYY-MM-DD date argument.
pub(crate) fn parse_date(s: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid {what} date: {s}"))
}

/// Open a sink writing to `output` in the requested format.
pub(crate) fn make_sink(
    output: &Path,
    format: Format,
    mark_synthesized: bool,
) -> Result<Box<dyn BarSink>> {
    let sink: Box<dyn BarSink> = match format {
        Format::Csv => Box::new(CsvSink::create(output)?.with_mark_synthesized(mark_synthesized)),
        Format::Json => Box::new(JsonSink::create(output)?),
        Format::Ndjson => Box::new(JsonSink::create_ndjson(output)?),
        #[cfg(feature = "parquet")]
        Format::Parquet => Box::new(ParquetSink::create(output)?),
        #[cfg(not(feature = "parquet"))]
        Format::Parquet => anyhow::bail!("Parquet support not compiled in"),
    };
    Ok(sink)
}

/// Progress spinner for a running fetch session.
pub(crate) fn session_spinner(quiet: bool, message: String) -> ProgressBar {
    if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("Invalid progress template"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message(message);
        pb
    }
}

/// Print the session summary table.
pub(crate) fn print_summary(summary: &FetchSummary, output: &Path) {
    println!("{:<20} {}", "Requests issued:", summary.requests_issued);
    println!("{:<20} {}", "Rows written:", summary.rows_written);
    println!("{:<20} {}", "Synthesized rows:", summary.synthesized_rows);
    println!("{:<20} {}", "Duplicates skipped:", summary.duplicates_skipped);
    println!("{:<20} {}", "Bars filtered:", summary.bars_filtered);
    if let (Some(first), Some(last)) = (summary.first_timestamp, summary.last_timestamp) {
        println!(
            "{:<20} {} to {}",
            "Coverage:",
            first.format("%Y-%m-%d %H:%M"),
            last.format("%Y-%m-%d %H:%M")
        );
    }
    println!("Output written to: {}", output.display());
}
