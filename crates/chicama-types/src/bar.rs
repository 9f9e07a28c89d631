//! OHLCV bar representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A bar as delivered by the source, before timestamp normalization.
///
/// The `time` field carries the provider's session-clock string, either
/// intraday (`"20241001 06:30:00"`) or a bare date (`"20241001"`) for
/// daily bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Session-clock timestamp as formatted by the provider.
    pub time: String,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: i64,
}

impl RawBar {
    /// Creates a new raw bar.
    #[must_use]
    pub fn new(
        time: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            time: time.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// A normalized OHLCV sample.
///
/// Timestamps are unambiguous instants; the session-clock corrections
/// applied during normalization have already been folded in. Synthesized
/// rows come from gap-filling, not from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Normalized timestamp.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: i64,
    /// True if this row was synthesized by gap-filling.
    pub synthesized: bool,
}

impl Bar {
    /// Creates a new observed bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            synthesized: false,
        }
    }

    /// Creates a synthesized gap-fill bar carrying the given values.
    #[must_use]
    pub const fn synthesized(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: i64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            synthesized: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_raw_bar_creation() {
        let raw = RawBar::new("20241001 06:30:00", 570.5, 571.0, 570.25, 570.75, 12500);
        assert_eq!(raw.time, "20241001 06:30:00");
        assert!((raw.open - 570.5).abs() < 1e-10);
        assert!((raw.close - 570.75).abs() < 1e-10);
        assert_eq!(raw.volume, 12500);
    }

    #[test]
    fn test_bar_creation() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::new(ts, 570.5, 571.0, 570.25, 570.75, 12500);
        assert_eq!(bar.timestamp, ts);
        assert!(!bar.synthesized);
    }

    #[test]
    fn test_synthesized_bar() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::synthesized(ts, 570.5, 571.0, 570.25, 570.75, 0);
        assert!(bar.synthesized);
    }

    #[test]
    fn test_bar_serialization_round_trip() {
        let ts = Utc.with_ymd_and_hms(2024, 10, 1, 9, 30, 0).unwrap();
        let bar = Bar::new(ts, 570.5, 571.0, 570.25, 570.75, 12500);
        let json = serde_json::to_string(&bar).unwrap();
        let back: Bar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, back);
    }
}
