//! The bar source capability.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use chicama_types::{BarField, BarSize, Contract, RawBar, RequestSpan};

/// One bounded historical-data request as handed to a source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRequest {
    /// Contract to fetch.
    pub contract: Contract,
    /// End instant the request reaches backward from.
    pub end: DateTime<Utc>,
    /// Requested span.
    pub span: RequestSpan,
    /// Bar bucket size.
    pub bar_size: BarSize,
    /// Price series to return.
    pub field: BarField,
    /// Restrict bars to regular trading hours.
    pub rth_only: bool,
    /// Ask the provider for formatted timestamp strings.
    pub format_as_text: bool,
}

/// Errors a source can produce.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failure reported by the provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Capture directory missing, malformed, or exhausted.
    #[error("Replay error: {0}")]
    Replay(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed capture content.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Stream of bars for one bounded request.
///
/// The stream terminating is the batch-complete signal; there is no
/// separate marker item.
pub type BarBatchStream = BoxStream<'static, Result<RawBar, SourceError>>;

/// Asynchronous provider of historical bars.
///
/// One call to [`request`](BarSource::request) corresponds to one
/// bounded request. The returned stream yields that batch's bars in
/// delivery order, oldest first.
#[async_trait]
pub trait BarSource: Send + Sync {
    /// Issues one bounded historical-data request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be issued at all; errors
    /// during delivery surface as stream items.
    async fn request(&self, req: &HistoricalRequest) -> Result<BarBatchStream, SourceError>;
}
