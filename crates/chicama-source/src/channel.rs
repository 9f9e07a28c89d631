//! Channel bridge for callback-driven providers.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;

use chicama_types::RawBar;

use crate::{BarBatchStream, BarSource, HistoricalRequest, SourceError};

/// Event pushed by a provider integration.
#[derive(Debug, Clone, PartialEq)]
pub enum BarEvent {
    /// One bar of the current batch.
    Bar(RawBar),
    /// The current batch is complete.
    BatchComplete,
    /// Provider-reported failure; ends the session.
    Error(String),
}

/// Push handle held by the provider integration.
///
/// Provider SDKs deliver bars through callbacks on their own thread;
/// the integration forwards each callback here.
#[derive(Debug, Clone)]
pub struct BarFeed {
    tx: mpsc::UnboundedSender<BarEvent>,
}

impl BarFeed {
    /// Pushes one bar of the current batch.
    pub fn bar(&self, bar: RawBar) {
        let _ = self.tx.send(BarEvent::Bar(bar));
    }

    /// Signals that the current batch is complete.
    pub fn batch_complete(&self) {
        let _ = self.tx.send(BarEvent::BatchComplete);
    }

    /// Reports a provider failure.
    pub fn error(&self, message: impl Into<String>) {
        let _ = self.tx.send(BarEvent::Error(message.into()));
    }
}

/// Bridges a callback-driven provider onto the source capability.
///
/// Each [`request`](BarSource::request) call forwards the request to the
/// dispatch closure (which issues it against the provider SDK) and
/// returns a stream that drains feed events up to the next
/// [`BarEvent::BatchComplete`]. A dropped feed surfaces as a provider
/// error rather than a clean batch end.
pub struct ChannelSource {
    dispatch: Box<dyn Fn(&HistoricalRequest) -> Result<(), SourceError> + Send + Sync>,
    rx: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<BarEvent>>>,
}

impl ChannelSource {
    /// Creates the bridge, returning the source and the feed the
    /// provider integration pushes into.
    pub fn new(
        dispatch: impl Fn(&HistoricalRequest) -> Result<(), SourceError> + Send + Sync + 'static,
    ) -> (Self, BarFeed) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                dispatch: Box::new(dispatch),
                rx: Arc::new(tokio::sync::Mutex::new(rx)),
            },
            BarFeed { tx },
        )
    }
}

impl fmt::Debug for ChannelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl BarSource for ChannelSource {
    async fn request(&self, req: &HistoricalRequest) -> Result<BarBatchStream, SourceError> {
        (self.dispatch)(req)?;
        let rx = Arc::clone(&self.rx);
        let batch = stream::unfold((rx, false), |(rx, done)| async move {
            if done {
                return None;
            }
            let event = rx.lock().await.recv().await;
            match event {
                Some(BarEvent::Bar(bar)) => Some((Ok(bar), (rx, false))),
                Some(BarEvent::BatchComplete) => None,
                Some(BarEvent::Error(message)) => {
                    Some((Err(SourceError::Provider(message)), (rx, true)))
                }
                None => Some((
                    Err(SourceError::Provider("bar feed closed".to_string())),
                    (rx, true),
                )),
            }
        });
        Ok(batch.boxed())
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
    async fn test_drains_one_batch() {
        let (source, feed) = ChannelSource::new(|_| Ok(()));

        feed.bar(RawBar::new("20241001 06:30:00", 570.0, 570.5, 569.5, 570.25, 100));
        feed.bar(RawBar::new("20241001 06:31:00", 570.25, 570.5, 570.0, 570.5, 80));
        feed.batch_complete();

        let bars: Vec<_> = source.request(&request()).await.unwrap().collect().await;
        assert_eq!(bars.len(), 2);
        assert!(bars.iter().all(std::result::Result::is_ok));
    }

    #[tokio::test]
    async fn test_batches_are_consumed_in_sequence() {
        let (source, feed) = ChannelSource::new(|_| Ok(()));

        feed.bar(RawBar::new("20241001 06:30:00", 1.0, 1.0, 1.0, 1.0, 1));
        feed.batch_complete();
        feed.bar(RawBar::new("20241002 06:30:00", 2.0, 2.0, 2.0, 2.0, 2));
        feed.batch_complete();

        let first: Vec<_> = source.request(&request()).await.unwrap().collect().await;
        let second: Vec<_> = source.request(&request()).await.unwrap().collect().await;

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].as_ref().unwrap().time, "20241002 06:30:00");
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_in_stream() {
        let (source, feed) = ChannelSource::new(|_| Ok(()));

        feed.bar(RawBar::new("20241001 06:30:00", 1.0, 1.0, 1.0, 1.0, 1));
        feed.error("historical data farm is down");

        let items: Vec<_> = source.request(&request()).await.unwrap().collect().await;
        assert!(items[0].is_ok());
        assert!(matches!(items[1], Err(SourceError::Provider(_))));
    }

    #[tokio::test]
    async fn test_dropped_feed_is_an_error() {
        let (source, feed) = ChannelSource::new(|_| Ok(()));
        drop(feed);

        let items: Vec<_> = source.request(&request()).await.unwrap().collect().await;
        assert_eq!(items.len(), 1);
        assert!(matches!(items[0], Err(SourceError::Provider(_))));
    }

    #[tokio::test]
    async fn test_dispatch_failure_fails_request() {
        let (source, _feed) =
            ChannelSource::new(|_| Err(SourceError::Provider("not connected".to_string())));
        assert!(source.request(&request()).await.is_err());
    }
}
