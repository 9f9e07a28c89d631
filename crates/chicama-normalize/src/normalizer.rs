//! Session-clock timestamp normalization.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use thiserror::Error;

use chicama_types::{Bar, RawBar, SessionProfile};

/// Intraday timestamp format delivered by the provider.
const INTRADAY_FORMAT: &str = "%Y%m%d %H:%M:%S";

/// Daily timestamp format, a bare date.
const DAILY_FORMAT: &str = "%Y%m%d";

/// Errors during timestamp normalization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// The timestamp matched neither the intraday nor the daily format.
    #[error("Unparseable timestamp: '{0}'")]
    BadTimestamp(String),
}

/// Maps session-clock timestamps onto unambiguous instants.
///
/// The first bar seen on each calendar day fixes that day's clock
/// correction, looked up from the profile's anchor table; later bars on
/// the same day reuse the cached value, so a mid-day anchor hour never
/// changes an already-fixed correction.
#[derive(Debug)]
pub struct TimestampNormalizer {
    profile: SessionProfile,
    day_offsets: HashMap<NaiveDate, i64>,
}

impl TimestampNormalizer {
    /// Creates a normalizer for the given session profile.
    #[must_use]
    pub fn new(profile: SessionProfile) -> Self {
        Self {
            profile,
            day_offsets: HashMap::new(),
        }
    }

    /// Returns the session profile.
    #[must_use]
    pub const fn profile(&self) -> SessionProfile {
        self.profile
    }

    /// Normalizes one raw bar.
    ///
    /// Intraday timestamps get the day's clock correction added; a bare
    /// date becomes 18:00 on that day.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp matches neither format.
    pub fn normalize(&mut self, raw: &RawBar) -> Result<Bar, NormalizeError> {
        let local = parse_session_timestamp(&raw.time)?;
        let offset = self.offset_for(local);
        let instant = Utc.from_utc_datetime(&local) + TimeDelta::hours(offset);
        Ok(Bar::new(
            instant, raw.open, raw.high, raw.low, raw.close, raw.volume,
        ))
    }

    /// Returns the correction in hours for the timestamp's day, deriving
    /// and caching it if this is the first bar of that day.
    fn offset_for(&mut self, local: NaiveDateTime) -> i64 {
        *self
            .day_offsets
            .entry(local.date())
            .or_insert_with(|| anchor_offset_hours(self.profile, local.time()))
    }
}

/// Parses a session-clock timestamp, falling back to the daily format.
fn parse_session_timestamp(text: &str) -> Result<NaiveDateTime, NormalizeError> {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(text, INTRADAY_FORMAT) {
        return Ok(timestamp);
    }
    NaiveDate::parse_from_str(text, DAILY_FORMAT)
        .map(|date| date.and_hms_opt(18, 0, 0).expect("valid time"))
        .map_err(|_| NormalizeError::BadTimestamp(text.to_string()))
}

/// Correction table keyed by a day's first observed clock time.
fn anchor_offset_hours(profile: SessionProfile, time: NaiveTime) -> i64 {
    match profile {
        SessionProfile::UsEquity => match time.hour() {
            6 => 3,
            7 => 2,
            8 => 1,
            _ => 0,
        },
        SessionProfile::CboeVix => match (time.hour(), time.minute()) {
            (0, 15) => 3,
            (1, 15) => 2,
            (2, 15) => 1,
            _ => 0,
        },
    }
}
