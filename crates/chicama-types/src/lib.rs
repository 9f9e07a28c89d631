//! Core types for the chicama historical bar downloader.
//!
//! This crate provides the fundamental data structures used throughout
//! chicama:
//!
//! - [`RawBar`] / [`Bar`] - OHLCV samples before and after normalization
//! - [`Contract`] - Instrument identity for historical-data requests
//! - [`BarSize`] / [`BarField`] / [`RequestSpan`] - Request vocabulary
//! - [`FetchWindow`] - The date range a session covers
//! - [`paginate`] - Bounded-request planning
//! - [`BarSink`] - Append-only output capability
//! - [`Clock`] - Pinnable wall clock for replay
//! - [`ChicamaError`] - Error types

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod clock;
mod contract;
mod error;
pub mod paginate;
mod request;
mod sink;
mod window;

pub use bar::{Bar, RawBar};
pub use clock::Clock;
pub use contract::{Contract, SecurityType, SecurityTypeParseError, SessionProfile};
pub use error::{ChicamaError, Result, WindowError};
pub use paginate::{Continuation, PlannedRequest};
pub use request::{
    BarField, BarFieldParseError, BarSize, BarSizeParseError, RequestSpan, SpanUnit,
};
pub use sink::{BarSink, SinkError};
pub use window::FetchWindow;
