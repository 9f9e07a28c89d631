//! Rust library for fetching historical OHLCV bars.
//!
//! This is a facade crate that re-exports functionality from the
//! chicama workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use chicama_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = ContractRegistry::global();
//!     let contract = registry.get("spy").unwrap().clone();
//!
//!     let window = FetchWindow::new(
//!         chrono::NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
//!         chrono::NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
//!     )?;
//!
//!     let source = ReplaySource::open("captures/spy")?;
//!     let sink = CsvSink::create("SPY-USD-ARCA-1min.csv")?;
//!
//!     let summary =
//!         FetchSession::new(source, sink, contract, BarSize::Min1, BarField::Trades, window)
//!             .run()
//!             .await?;
//!     println!("Wrote {} rows", summary.rows_written);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use chicama_types::*;

// Re-export contract registry
pub use chicama_contracts::ContractRegistry;

// Re-export bar sources
#[cfg(feature = "source")]
pub use chicama_source::{
    BarBatchStream, BarEvent, BarFeed, BarSource, ChannelSource, HistoricalRequest,
    RecordingSource, ReplaySource, ScriptedSource, SourceError,
};

// Re-export normalization
#[cfg(feature = "normalize")]
pub use chicama_normalize::{GapFiller, NormalizeError, TimestampNormalizer};

// Re-export fetch sessions
#[cfg(feature = "fetch")]
pub use chicama_fetch::{CancelToken, FetchSession, FetchSummary};

// Re-export output sinks
#[cfg(feature = "format")]
pub use chicama_format::{
    CsvSink, FormatParseError, JsonSink, JsonStyle, OutputFormat, default_file_name,
};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use chicama_format::ParquetSink;

/// Prelude module for convenient imports.
///
/// ```
/// use chicama_lib::prelude::*;
/// ```
pub mod prelude {
    pub use chicama_types::{
        Bar, BarField, BarSink, BarSize, ChicamaError, Clock, Contract, FetchWindow, RawBar,
        Result, SecurityType, SessionProfile,
    };

    pub use chicama_contracts::ContractRegistry;

    #[cfg(feature = "source")]
    pub use chicama_source::{
        BarSource, ChannelSource, HistoricalRequest, ReplaySource, ScriptedSource,
    };

    #[cfg(feature = "fetch")]
    pub use chicama_fetch::{CancelToken, FetchSession, FetchSummary};

    #[cfg(feature = "format")]
    pub use chicama_format::{CsvSink, JsonSink, OutputFormat, default_file_name};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use chicama_format::ParquetSink;
}
