//! Regular-session window filtering and gap-filling.

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use chicama_types::{Bar, SessionProfile};

/// First minute of the regular session, as minutes since midnight.
const SESSION_OPEN_MINUTE: u32 = 9 * 60 + 30;

/// Last minute of the regular session, as minutes since midnight.
const SESSION_LAST_MINUTE: u32 = 15 * 60 + 59;

/// Applies a profile's regular-session rules to normalized bars.
///
/// For profiles with [`fills_gaps`](SessionProfile::fills_gaps) set:
/// bars outside the 09:30-15:59 window are dropped, a previous day that
/// stopped short of 15:59 is topped up with copies of its last bar, and
/// a day opening after 09:30 is backfilled from the open with copies of
/// its first bar. Other profiles pass bars through untouched.
///
/// Bars must arrive in delivery order; the emitted rows for one input
/// are strictly minute-increasing and the input bar, when it survives
/// the filter, is always last.
#[derive(Debug)]
pub struct GapFiller {
    profile: SessionProfile,
    previous: Option<Bar>,
}

impl GapFiller {
    /// Creates a gap filler for the given session profile.
    #[must_use]
    pub const fn new(profile: SessionProfile) -> Self {
        Self {
            profile,
            previous: None,
        }
    }

    /// Runs one normalized bar through the session rules.
    ///
    /// Returns the rows to emit, oldest first; empty when the window
    /// filter discards the bar.
    pub fn process(&mut self, bar: Bar) -> Vec<Bar> {
        if !self.profile.fills_gaps() {
            return vec![bar];
        }
        if outside_session(&bar.timestamp) {
            return Vec::new();
        }

        let mut rows = Vec::new();
        let new_day = self
            .previous
            .is_none_or(|prev| prev.timestamp.date_naive() != bar.timestamp.date_naive());

        if new_day {
            // Top up the previous day if it stopped short of the close.
            if let Some(prev) = self.previous {
                let mut cursor = prev.timestamp + TimeDelta::minutes(1);
                let close = at_minute(prev.timestamp, SESSION_LAST_MINUTE);
                while cursor <= close {
                    rows.push(Bar::synthesized(
                        cursor, prev.open, prev.high, prev.low, prev.close, prev.volume,
                    ));
                    cursor += TimeDelta::minutes(1);
                }
            }

            // Backfill from the open to a late first bar.
            let mut cursor = at_minute(bar.timestamp, SESSION_OPEN_MINUTE);
            while cursor < bar.timestamp {
                rows.push(Bar::synthesized(
                    cursor, bar.open, bar.high, bar.low, bar.close, bar.volume,
                ));
                cursor += TimeDelta::minutes(1);
            }
        }

        self.previous = Some(bar);
        rows.push(bar);
        rows
    }
}

/// True outside the regular-session window.
fn outside_session(timestamp: &DateTime<Utc>) -> bool {
    let minute = timestamp.hour() * 60 + timestamp.minute();
    !(SESSION_OPEN_MINUTE..=SESSION_LAST_MINUTE).contains(&minute)
}

/// The same day at the given minute since midnight, on the minute.
fn at_minute(timestamp: DateTime<Utc>, minute: u32) -> DateTime<Utc> {
    timestamp - TimeDelta::minutes(i64::from(timestamp.hour() * 60 + timestamp.minute()))
        - TimeDelta::seconds(i64::from(timestamp.second()))
        + TimeDelta::minutes(i64::from(minute))
}
