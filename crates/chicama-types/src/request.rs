//! Request vocabulary: bar sizes, price fields, and bounded spans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size of the time bucket each bar covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarSize {
    /// 1-minute bars.
    #[default]
    #[serde(rename = "1min")]
    Min1,
    /// 5-minute bars.
    #[serde(rename = "5min")]
    Min5,
    /// 15-minute bars.
    #[serde(rename = "15min")]
    Min15,
    /// 30-minute bars.
    #[serde(rename = "30min")]
    Min30,
    /// 1-hour bars.
    #[serde(rename = "1hour")]
    Hour1,
    /// Daily bars.
    #[serde(rename = "1day")]
    Day1,
}

impl BarSize {
    /// Returns the provider's display string for this size.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1 min",
            Self::Min5 => "5 mins",
            Self::Min15 => "15 mins",
            Self::Min30 => "30 mins",
            Self::Hour1 => "1 hour",
            Self::Day1 => "1 day",
        }
    }

    /// Returns the label used in output file names.
    #[must_use]
    pub const fn file_label(&self) -> &'static str {
        match self {
            Self::Min1 => "1min",
            Self::Min5 => "5mins",
            Self::Min15 => "15mins",
            Self::Min30 => "30mins",
            Self::Hour1 => "1hour",
            Self::Day1 => "1day",
        }
    }

    /// Returns the bar duration in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        match self {
            Self::Min1 => 60,
            Self::Min5 => 300,
            Self::Min15 => 900,
            Self::Min30 => 1800,
            Self::Hour1 => 3600,
            Self::Day1 => 86400,
        }
    }

    /// Returns all available bar sizes.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Min1,
            Self::Min5,
            Self::Min15,
            Self::Min30,
            Self::Hour1,
            Self::Day1,
        ]
    }
}

impl fmt::Display for BarSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BarSize {
    type Err = BarSizeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1min" | "1 min" | "1m" => Ok(Self::Min1),
            "5min" | "5 mins" | "5m" => Ok(Self::Min5),
            "15min" | "15 mins" | "15m" => Ok(Self::Min15),
            "30min" | "30 mins" | "30m" => Ok(Self::Min30),
            "1hour" | "1 hour" | "1h" => Ok(Self::Hour1),
            "1day" | "1 day" | "1d" => Ok(Self::Day1),
            _ => Err(BarSizeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid bar size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSizeParseError(String);

impl fmt::Display for BarSizeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid bar size: '{}'. Valid sizes: 1min, 5min, 15min, 30min, 1hour, 1day",
            self.0
        )
    }
}

impl std::error::Error for BarSizeParseError {}

/// Which price series the provider should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarField {
    /// Actual trades.
    #[default]
    Trades,
    /// Midpoint between bid and ask.
    MidPoint,
    /// Bid prices.
    Bid,
    /// Ask prices.
    Ask,
}

impl BarField {
    /// Returns the provider's field code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trades => "TRADES",
            Self::MidPoint => "MIDPOINT",
            Self::Bid => "BID",
            Self::Ask => "ASK",
        }
    }

    /// Returns all available price fields.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Trades, Self::MidPoint, Self::Bid, Self::Ask]
    }
}

impl fmt::Display for BarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BarField {
    type Err = BarFieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trades" => Ok(Self::Trades),
            "midpoint" | "mid" => Ok(Self::MidPoint),
            "bid" => Ok(Self::Bid),
            "ask" => Ok(Self::Ask),
            _ => Err(BarFieldParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid price field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarFieldParseError(String);

impl fmt::Display for BarFieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid price field: '{}'. Valid fields: trades, midpoint, bid, ask",
            self.0
        )
    }
}

impl std::error::Error for BarFieldParseError {}

/// Unit of a bounded request span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanUnit {
    /// Business-day granularity.
    Day,
    /// Calendar-year granularity.
    Year,
}

impl SpanUnit {
    /// Returns the provider's unit code.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Self::Day => 'D',
            Self::Year => 'Y',
        }
    }
}

/// Bounded duration of a single historical-data request.
///
/// The provider caps how much history one request may return, so spans
/// are always explicit: a business-day count for short reaches, one
/// calendar year for long ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestSpan {
    /// Span magnitude.
    pub value: i32,
    /// Span unit.
    pub unit: SpanUnit,
}

impl RequestSpan {
    /// Creates a day-denominated span.
    #[must_use]
    pub const fn days(value: i32) -> Self {
        Self {
            value,
            unit: SpanUnit::Day,
        }
    }

    /// Creates a year-denominated span.
    #[must_use]
    pub const fn years(value: i32) -> Self {
        Self {
            value,
            unit: SpanUnit::Year,
        }
    }
}

impl fmt::Display for RequestSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_size_display() {
        assert_eq!(BarSize::Min1.to_string(), "1 min");
        assert_eq!(BarSize::Min5.to_string(), "5 mins");
        assert_eq!(BarSize::Hour1.to_string(), "1 hour");
        assert_eq!(BarSize::Day1.to_string(), "1 day");
    }

    #[test]
    fn test_bar_size_file_label() {
        assert_eq!(BarSize::Min1.file_label(), "1min");
        assert_eq!(BarSize::Min30.file_label(), "30mins");
        assert_eq!(BarSize::Day1.file_label(), "1day");
    }

    #[test]
    fn test_bar_size_from_str() {
        assert_eq!("1min".parse::<BarSize>().unwrap(), BarSize::Min1);
        assert_eq!("1 min".parse::<BarSize>().unwrap(), BarSize::Min1);
        assert_eq!("5m".parse::<BarSize>().unwrap(), BarSize::Min5);
        assert_eq!("1DAY".parse::<BarSize>().unwrap(), BarSize::Day1);
        assert!("2min".parse::<BarSize>().is_err());
    }

    #[test]
    fn test_bar_size_seconds() {
        assert_eq!(BarSize::Min1.seconds(), 60);
        assert_eq!(BarSize::Hour1.seconds(), 3600);
        assert_eq!(BarSize::Day1.seconds(), 86400);
    }

    #[test]
    fn test_bar_size_all() {
        assert_eq!(BarSize::all().len(), 6);
    }

    #[test]
    fn test_bar_field_codes() {
        assert_eq!(BarField::Trades.as_str(), "TRADES");
        assert_eq!(BarField::MidPoint.as_str(), "MIDPOINT");
        assert_eq!(BarField::Bid.as_str(), "BID");
        assert_eq!(BarField::Ask.as_str(), "ASK");
    }

    #[test]
    fn test_bar_field_from_str() {
        assert_eq!("trades".parse::<BarField>().unwrap(), BarField::Trades);
        assert_eq!("MID".parse::<BarField>().unwrap(), BarField::MidPoint);
        assert!("last".parse::<BarField>().is_err());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(RequestSpan::days(30).to_string(), "30 D");
        assert_eq!(RequestSpan::days(1).to_string(), "1 D");
        assert_eq!(RequestSpan::years(1).to_string(), "1 Y");
    }

    #[test]
    fn test_span_equality() {
        assert_eq!(RequestSpan::days(5), RequestSpan::days(5));
        assert_ne!(RequestSpan::days(1), RequestSpan::years(1));
    }

    #[test]
    fn test_parse_error_messages() {
        let err = "2min".parse::<BarSize>().unwrap_err();
        assert!(err.to_string().contains("2min"));
        assert!(err.to_string().contains("1min"));

        let err = "last".parse::<BarField>().unwrap_err();
        assert!(err.to_string().contains("trades"));
    }
}
