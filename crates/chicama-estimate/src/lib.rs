//! Fetch planning and size estimation.
//!
//! This crate predicts what a fetch session will do before it runs:
//!
//! - [`plan`]: walks a window through the pagination rules and returns
//!   a [`FetchPlan`] with request, row, size, and duration estimates
//! - [`format_bytes`] / [`format_duration`]: human-readable rendering
//!   for plan output

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod planner;

pub use planner::{FetchPlan, format_bytes, format_duration, plan};
