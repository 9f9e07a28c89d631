//! Output format identifiers and file naming.

use std::fmt;
use std::str::FromStr;

use chicama_types::{BarSize, Contract};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
    /// Apache Parquet format.
    Parquet,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Json, Self::Ndjson, Self::Parquet]
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "parquet" | "pq" => Ok(Self::Parquet),
            _ => Err(FormatParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatParseError(String);

impl fmt::Display for FormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid output format: '{}'. Valid formats: csv, json, ndjson, parquet",
            self.0
        )
    }
}

impl std::error::Error for FormatParseError {}

/// Returns the conventional output file name for a contract.
///
/// The name is `SYMBOL-CURRENCY-EXCHANGE-BARSIZE.ext`, for example
/// `SPY-USD-ARCA-1min.csv`.
#[must_use]
pub fn default_file_name(contract: &Contract, bar_size: BarSize, format: OutputFormat) -> String {
    format!(
        "{}-{}-{}-{}.{}",
        contract.symbol(),
        contract.currency(),
        contract.exchange(),
        bar_size.file_label(),
        format.extension()
    )
}
