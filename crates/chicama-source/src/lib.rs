//! Bar sources for the chicama historical bar downloader.
//!
//! A fetch session pulls bars through the [`BarSource`] capability: one
//! call per bounded request, one [`BarBatchStream`] per delivered batch.
//! This crate defines the capability and the bundled implementations:
//!
//! - [`ScriptedSource`] - canned batches served in call order
//! - [`ReplaySource`] - batches captured on disk
//! - [`RecordingSource`] - capture-writing decorator
//! - [`ChannelSource`] - bridge for callback-driven provider SDKs

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/chicama/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod channel;
mod replay;
mod scripted;
mod source;

pub use channel::{BarEvent, BarFeed, ChannelSource};
pub use replay::{RecordingSource, ReplaySource};
pub use scripted::ScriptedSource;
pub use source::{BarBatchStream, BarSource, HistoricalRequest, SourceError};
