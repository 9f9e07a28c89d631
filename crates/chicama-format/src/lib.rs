//! Output sinks for chicama historical bar fetcher.
//!
//! This crate provides streaming sinks for writing fetched bars to
//! various output formats:
//!
//! - [`CsvSink`] - CSV format
//! - [`JsonSink`] - JSON array or NDJSON format
//! - [`ParquetSink`] - Apache Parquet columnar format
//!
//! All sinks implement [`chicama_types::BarSink`] and are fed one row
//! at a time by a fetch session.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod format;
mod json;

#[cfg(feature = "parquet")]
mod parquet;

pub use crate::csv::CsvSink;
pub use format::{FormatParseError, OutputFormat, default_file_name};
pub use json::{JsonSink, JsonStyle};

#[cfg(feature = "parquet")]
pub use crate::parquet::ParquetSink;
