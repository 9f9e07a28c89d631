//! Append-only bar sink capability.

use thiserror::Error;

use crate::Bar;

/// Errors a sink can produce.
#[derive(Error, Debug)]
pub enum SinkError {
    /// I/O failure while opening, appending, or closing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Row could not be encoded.
    #[error("Encode error: {0}")]
    Encode(String),
}

/// Append-only writer for normalized bars.
///
/// A sink receives each row exactly once, in the order the session emits
/// them, and is flushed and closed by [`finish`](BarSink::finish) at
/// session end.
pub trait BarSink: Send {
    /// Appends one bar.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be written.
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError>;

    /// Flushes buffered rows and closes the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing or closing fails.
    fn finish(&mut self) -> Result<(), SinkError>;
}

impl<K: BarSink + ?Sized> BarSink for &mut K {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        (**self).append(bar)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

impl<K: BarSink + ?Sized> BarSink for Box<K> {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        (**self).append(bar)
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        (**self).finish()
    }
}

/// In-memory sink, useful for tests and small sessions.
impl BarSink for Vec<Bar> {
    fn append(&mut self, bar: &Bar) -> Result<(), SinkError> {
        self.push(*bar);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_vec_sink_collects_bars() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::new(ts, 570.5, 571.0, 570.25, 570.75, 12500);

        let mut rows: Vec<Bar> = Vec::new();
        BarSink::append(&mut rows, &bar).unwrap();
        BarSink::finish(&mut rows).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], bar);
    }

    #[test]
    fn test_mut_ref_forwards() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::new(ts, 570.5, 571.0, 570.25, 570.75, 12500);

        let mut rows: Vec<Bar> = Vec::new();
        {
            let mut sink: &mut Vec<Bar> = &mut rows;
            BarSink::append(&mut sink, &bar).unwrap();
            BarSink::finish(&mut sink).unwrap();
        }
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_boxed_sink_forwards() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::new(ts, 570.5, 571.0, 570.25, 570.75, 12500);

        let mut sink: Box<dyn BarSink> = Box::new(Vec::new());
        sink.append(&bar).unwrap();
        sink.finish().unwrap();
    }
}
