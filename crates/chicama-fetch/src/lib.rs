//! Paginated fetch sessions for historical bars.
//!
//! This crate drives the request loop:
//!
//! - [`FetchSession`]: plans bounded requests, pulls batches from a
//!   source, and pipes normalized rows into a sink
//! - [`FetchSummary`]: counters describing what a session wrote
//! - [`CancelToken`]: cooperative cancellation shared with callers

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cancel;
mod session;

pub use cancel::CancelToken;
pub use session::{FetchSession, FetchSummary};
