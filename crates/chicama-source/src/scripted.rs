//! Scripted source serving canned batches.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use chicama_types::RawBar;

use crate::{BarBatchStream, BarSource, HistoricalRequest, SourceError};

/// Source that serves pre-arranged batches in call order.
///
/// Each call to [`request`](BarSource::request) pops the next batch and
/// records the request it was asked for. Clones share state, so a test
/// can keep a handle and inspect [`requests`](Self::requests) after the
/// session consumed its copy. Requests beyond the script fail.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    batches: Mutex<VecDeque<Vec<RawBar>>>,
    requests: Mutex<Vec<HistoricalRequest>>,
}

impl ScriptedSource {
    /// Creates a source that will serve the given batches in order.
    #[must_use]
    pub fn new(batches: Vec<Vec<RawBar>>) -> Self {
        Self {
            inner: Arc::new(Inner {
                batches: Mutex::new(batches.into_iter().collect()),
                requests: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns the requests issued so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<HistoricalRequest> {
        self.inner.requests.lock().expect("requests lock").clone()
    }

    /// Returns the number of batches not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.inner.batches.lock().expect("batches lock").len()
    }
}

#[async_trait]
impl BarSource for ScriptedSource {
    async fn request(&self, req: &HistoricalRequest) -> Result<BarBatchStream, SourceError> {
        self.inner
            .requests
            .lock()
            .expect("requests lock")
            .push(req.clone());
        let batch = self
            .inner
            .batches
            .lock()
            .expect("batches lock")
            .pop_front()
            .ok_or_else(|| SourceError::Provider("script exhausted".to_string()))?;
        Ok(stream::iter(batch.into_iter().map(Ok)).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chicama_types::{BarField, BarSize, Contract, RequestSpan};
    use chrono::{TimeZone, Utc};

    fn request() -> HistoricalRequest {
        HistoricalRequest {
            contract: Contract::stock("SPY", "ARCA"),
            end: Utc.with_ymd_and_hms(2024, 11, 1, 0, 0, 0).unwrap(),
            span: RequestSpan::days(24),
            bar_size: BarSize::Min1,
            field: BarField::Trades,
            rth_only: true,
            format_as_text: true,
        }
    }

    #[tokio::test]
    async fn test_serves_batches_in_order() {
        let bar_a = RawBar::new("20241001 06:30:00", 1.0, 1.0, 1.0, 1.0, 10);
        let bar_b = RawBar::new("20241002 06:30:00", 2.0, 2.0, 2.0, 2.0, 20);
        let source = ScriptedSource::new(vec![vec![bar_a.clone()], vec![bar_b.clone()]]);

        let first: Vec<_> = source.request(&request()).await.unwrap().collect().await;
        let second: Vec<_> = source.request(&request()).await.unwrap().collect().await;

        assert_eq!(first.len(), 1);
        assert_eq!(*first[0].as_ref().unwrap(), bar_a);
        assert_eq!(*second[0].as_ref().unwrap(), bar_b);
        assert_eq!(source.remaining(), 0);
    }

    #[tokio::test]
    async fn test_records_requests() {
        let source = ScriptedSource::new(vec![Vec::new()]);
        let handle = source.clone();

        let _ = source.request(&request()).await.unwrap();

        let seen = handle.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].span, RequestSpan::days(24));
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let source = ScriptedSource::new(Vec::new());
        let err = source.request(&request()).await.err().unwrap();
        assert!(matches!(err, SourceError::Provider(_)));
    }
}
