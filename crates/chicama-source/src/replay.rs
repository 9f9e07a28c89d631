//! Capture and replay of delivered batches.
//!
//! A capture directory holds numbered pairs: `0001-request.json`
//! describes a bounded request, `0001-batch.jsonl` the bars the provider
//! delivered for it, one JSON object per line. [`RecordingSource`]
//! writes such pairs while forwarding to a live source;
//! [`ReplaySource`] serves them back in file order.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use chicama_types::RawBar;

use crate::{BarBatchStream, BarSource, HistoricalRequest, SourceError};

/// Replays captured batches from a directory, strictly in file order.
///
/// Only `*-batch.jsonl` files participate; the request the session
/// actually issues is not matched against the recorded one beyond
/// ordering, which keeps captures usable after planner parameter
/// changes.
#[derive(Debug)]
pub struct ReplaySource {
    batches: Vec<PathBuf>,
    cursor: AtomicUsize,
}

impl ReplaySource {
    /// Opens a capture directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read or contains no
    /// batch files.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SourceError> {
        let dir = dir.as_ref();
        let mut batches: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("-batch.jsonl"))
            })
            .collect();
        batches.sort();
        if batches.is_empty() {
            return Err(SourceError::Replay(format!(
                "no batch files in {}",
                dir.display()
            )));
        }
        Ok(Self {
            batches,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Returns the number of captured batches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Returns true if the capture holds no batches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[async_trait]
impl BarSource for ReplaySource {
    async fn request(&self, _req: &HistoricalRequest) -> Result<BarBatchStream, SourceError> {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let path = self.batches.get(index).ok_or_else(|| {
            SourceError::Replay(format!(
                "capture exhausted after {} batches",
                self.batches.len()
            ))
        })?;
        let content = tokio::fs::read_to_string(path).await?;
        let bars: Vec<Result<RawBar, SourceError>> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str::<RawBar>(line).map_err(SourceError::from))
            .collect();
        Ok(stream::iter(bars).boxed())
    }
}

/// Decorates a source, writing each request and its delivered batch to
/// numbered files in a capture directory.
///
/// The decorated batch is buffered in full before the stream is handed
/// back, so captures are always complete pairs.
#[derive(Debug)]
pub struct RecordingSource<S> {
    inner: S,
    dir: PathBuf,
    sequence: AtomicUsize,
}

impl<S: BarSource> RecordingSource<S> {
    /// Creates the capture directory and wraps `inner`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(inner: S, dir: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            inner,
            dir,
            sequence: AtomicUsize::new(0),
        })
    }

    fn request_path(&self, id: usize) -> PathBuf {
        self.dir.join(format!("{id:04}-request.json"))
    }

    fn batch_path(&self, id: usize) -> PathBuf {
        self.dir.join(format!("{id:04}-batch.jsonl"))
    }
}

#[async_trait]
impl<S: BarSource> BarSource for RecordingSource<S> {
    async fn request(&self, req: &HistoricalRequest) -> Result<BarBatchStream, SourceError> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::fs::write(self.request_path(id), serde_json::to_vec_pretty(req)?).await?;

        let mut batch = self.inner.request(req).await?;
        let mut bars = Vec::new();
        while let Some(item) = batch.next().await {
            bars.push(item?);
        }

        let mut lines = String::new();
        for bar in &bars {
            lines.push_str(&serde_json::to_string(bar)?);
            lines.push('\n');
        }
        tokio::fs::write(self.batch_path(id), lines).await?;

        Ok(stream::iter(bars.into_iter().map(Ok)).boxed())
    }
}
