//! The paginated fetch session.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use futures::StreamExt;

use chicama_normalize::{GapFiller, TimestampNormalizer};
use chicama_source::{BarSource, HistoricalRequest};
use chicama_types::paginate::{self, Continuation, PlannedRequest};
use chicama_types::{
    BarField, BarSink, BarSize, ChicamaError, Clock, Contract, FetchWindow, RawBar, Result,
};

use crate::CancelToken;

/// Default guard against a provider that goes silent mid-batch.
const DEFAULT_STALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Outcome of a completed fetch session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchSummary {
    /// Bounded requests issued against the source.
    pub requests_issued: u32,
    /// Rows appended to the sink, synthesized rows included.
    pub rows_written: u64,
    /// Synthesized gap-fill rows among those written.
    pub synthesized_rows: u64,
    /// Bars skipped because their normalized timestamp was already written.
    pub duplicates_skipped: u64,
    /// Bars dropped by the regular-session window filter.
    pub bars_filtered: u64,
    /// Timestamp of the first row written.
    pub first_timestamp: Option<DateTime<Utc>>,
    /// Timestamp of the most recently written row.
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// Per-session pipeline state threaded across batches.
struct SessionState {
    normalizer: TimestampNormalizer,
    filler: GapFiller,
    seen: HashSet<DateTime<Utc>>,
    summary: FetchSummary,
}

impl SessionState {
    fn new(contract: &Contract) -> Self {
        Self {
            normalizer: TimestampNormalizer::new(contract.session()),
            filler: GapFiller::new(contract.session()),
            seen: HashSet::new(),
            summary: FetchSummary::default(),
        }
    }
}

/// A paginated fetch over one contract and window.
///
/// The session plans bounded requests with [`paginate`], pulls each
/// batch from its source, runs bars through normalization, session
/// shaping, and deduplication, and appends survivors to its sink. It
/// owns both endpoints and consumes itself on [`run`](Self::run).
#[derive(Debug)]
pub struct FetchSession<S, K> {
    source: S,
    sink: K,
    contract: Contract,
    bar_size: BarSize,
    field: BarField,
    window: FetchWindow,
    continue_until_complete: bool,
    clock: Clock,
    cancel: CancelToken,
    stall_timeout: Duration,
}

impl<S: BarSource, K: BarSink> FetchSession<S, K> {
    /// Creates a session with default settings: run to completion,
    /// system clock, no cancellation, 60-second stall guard.
    #[must_use]
    pub fn new(
        source: S,
        sink: K,
        contract: Contract,
        bar_size: BarSize,
        field: BarField,
        window: FetchWindow,
    ) -> Self {
        Self {
            source,
            sink,
            contract,
            bar_size,
            field,
            window,
            continue_until_complete: true,
            clock: Clock::default(),
            cancel: CancelToken::new(),
            stall_timeout: DEFAULT_STALL_TIMEOUT,
        }
    }

    /// Sets whether the session paginates past the first batch.
    #[must_use]
    pub const fn with_continue_until_complete(mut self, continue_until_complete: bool) -> Self {
        self.continue_until_complete = continue_until_complete;
        self
    }

    /// Sets the clock used for continuation decisions.
    #[must_use]
    pub const fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the cancellation token observed between bars and batches.
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Sets the stall guard applied while waiting for the next bar.
    #[must_use]
    pub const fn with_stall_timeout(mut self, stall_timeout: Duration) -> Self {
        self.stall_timeout = stall_timeout;
        self
    }

    /// Runs the session to completion.
    ///
    /// # Errors
    ///
    /// Returns an error on the first source, normalization, or sink
    /// failure, on cancellation, or when the stall guard fires. The
    /// sink is only closed on success.
    pub async fn run(mut self) -> Result<FetchSummary> {
        let mut state = SessionState::new(&self.contract);
        let mut planned = paginate::initial_request(self.window);
        let mut keep_going = self.continue_until_complete;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ChicamaError::Cancelled);
            }

            let request = self.historical_request(&planned);
            let mut batch = self
                .source
                .request(&request)
                .await
                .map_err(|e| ChicamaError::Source(e.to_string()))?;
            state.summary.requests_issued += 1;

            loop {
                match tokio::time::timeout(self.stall_timeout, batch.next()).await {
                    Err(_) => return Err(ChicamaError::Stalled(self.stall_timeout)),
                    Ok(None) => break,
                    Ok(Some(Err(e))) => return Err(ChicamaError::Source(e.to_string())),
                    Ok(Some(Ok(raw))) => self.on_bar(&mut state, &raw)?,
                }
                if self.cancel.is_cancelled() {
                    return Err(ChicamaError::Cancelled);
                }
            }

            // An empty batch still advances the cursor to its anchor.
            let last = state
                .summary
                .last_timestamp
                .map_or(planned.anchor, |ts| ts.date_naive());
            match paginate::continuation(
                self.window,
                last,
                self.clock.today(),
                planned.anchor,
                keep_going,
            ) {
                Continuation::Finished => break,
                Continuation::Final(next) => {
                    keep_going = false;
                    planned = next;
                }
                Continuation::Continue(next) => planned = next,
            }
        }

        self.sink
            .finish()
            .map_err(|e| ChicamaError::Sink(e.to_string()))?;
        Ok(state.summary)
    }

    /// Runs one raw bar through the pipeline into the sink.
    fn on_bar(&mut self, state: &mut SessionState, raw: &RawBar) -> Result<()> {
        let bar = state
            .normalizer
            .normalize(raw)
            .map_err(|e| ChicamaError::Normalize(e.to_string()))?;
        let rows = state.filler.process(bar);
        if rows.is_empty() {
            state.summary.bars_filtered += 1;
            return Ok(());
        }
        for row in rows {
            if !state.seen.insert(row.timestamp) {
                state.summary.duplicates_skipped += 1;
                continue;
            }
            self.sink
                .append(&row)
                .map_err(|e| ChicamaError::Sink(e.to_string()))?;
            state.summary.rows_written += 1;
            if row.synthesized {
                state.summary.synthesized_rows += 1;
            }
            if state.summary.first_timestamp.is_none() {
                state.summary.first_timestamp = Some(row.timestamp);
            }
            state.summary.last_timestamp = Some(row.timestamp);
        }
        Ok(())
    }

    /// Materializes a planned request into the source's request shape.
    fn historical_request(&self, planned: &PlannedRequest) -> HistoricalRequest {
        HistoricalRequest {
            contract: self.contract.clone(),
            end: end_instant(planned.anchor),
            span: planned.span,
            bar_size: self.bar_size,
            field: self.field,
            rth_only: true,
            format_as_text: true,
        }
    }
}

/// Midnight at the start of the anchor date.
fn end_instant(anchor: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&anchor.and_hms_opt(0, 0, 0).expect("valid time"))
}
