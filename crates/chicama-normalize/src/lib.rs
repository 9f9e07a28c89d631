//! Timestamp normalization and session shaping for the chicama
//! historical bar downloader.
//!
//! - [`TimestampNormalizer`] - maps session-clock strings onto instants,
//!   caching one clock correction per calendar day
//! - [`GapFiller`] - drops bars outside the regular session and
//!   synthesizes rows for missing open and close minutes
//! - [`NormalizeError`] - fatal timestamp parse failures

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod gapfill;
mod normalizer;

pub use gapfill::GapFiller;
pub use normalizer::{NormalizeError, TimestampNormalizer};
