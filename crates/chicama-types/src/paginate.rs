//! Bounded-request planning.
//!
//! The provider caps how much history a single request may return, so a
//! fetch session walks its window in bounded chunks. Each chunk reaches
//! backward from an anchor date over a day- or year-denominated span.
//! [`initial_request`] sizes the first chunk from the window alone;
//! [`continuation`] decides after each delivered batch whether the walk
//! is done, needs one final day-denominated segment, or hops forward
//! another calendar year.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::{FetchWindow, RequestSpan};

/// The session is complete once the gap between the last delivered bar
/// and the window's end shrinks to this many business days.
pub const COMPLETION_TOLERANCE_DAYS: i64 = 5;

/// Gaps above this many business days are covered by another full-year
/// request before a final day-denominated segment is worthwhile.
pub const YEAR_HOP_THRESHOLD_DAYS: i64 = 356;

/// Windows spanning at least this many business days start with a
/// year-denominated request instead of a day count.
pub const YEAR_CAP_DAYS: i64 = 365;

/// One bounded request: the end date it reaches backward from and the
/// span it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlannedRequest {
    /// End date the request reaches backward from.
    pub anchor: NaiveDate,
    /// Requested span.
    pub span: RequestSpan,
}

impl std::fmt::Display for PlannedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} back from {}", self.span, self.anchor)
    }
}

/// Decision for the next step after a batch completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The window is covered; close the session.
    Finished,
    /// One more bounded request covers the rest; stop after its batch.
    Final(PlannedRequest),
    /// Issue another full-year request and keep going.
    Continue(PlannedRequest),
}

/// Counts the weekdays in the inclusive range between two dates.
///
/// The arguments may be given in either order; Saturdays and Sundays
/// are excluded, exchange holidays are not.
#[must_use]
pub fn business_days(d1: NaiveDate, d2: NaiveDate) -> i64 {
    let (lo, hi) = if d1 <= d2 { (d1, d2) } else { (d2, d1) };
    lo.iter_days()
        .take_while(|day| *day <= hi)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as i64
}

/// Plans the first bounded request for a window.
///
/// The span is the window's business-day count anchored at the window
/// end. Windows of [`YEAR_CAP_DAYS`] business days or more start with a
/// one-year request anchored at January 1 of the year after the window
/// start instead.
#[must_use]
pub fn initial_request(window: FetchWindow) -> PlannedRequest {
    let span_days = business_days(window.from, window.to);
    if span_days >= YEAR_CAP_DAYS {
        PlannedRequest {
            anchor: jan_first(window.from.year() + 1),
            span: RequestSpan::years(1),
        }
    } else {
        PlannedRequest {
            anchor: window.to,
            span: RequestSpan::days(span_days.max(1) as i32),
        }
    }
}

/// Decides whether to issue another bounded request after a batch.
///
/// `last` is the date of the most recent delivered bar, `now` the
/// current wall-clock date, and `prev_anchor` the anchor of the request
/// whose batch just completed. With `keep_going` false the session stops
/// unconditionally. A cursor at or past `now` cannot be behind real
/// time, so it always takes the final segment, capped at one year when
/// the window end lies further out than [`YEAR_CAP_DAYS`].
#[must_use]
pub fn continuation(
    window: FetchWindow,
    last: NaiveDate,
    now: NaiveDate,
    prev_anchor: NaiveDate,
    keep_going: bool,
) -> Continuation {
    if !keep_going || business_days(last, window.to) <= COMPLETION_TOLERANCE_DAYS {
        return Continuation::Finished;
    }
    if last >= now {
        let remaining = business_days(last, window.to);
        let span = if remaining > YEAR_CAP_DAYS {
            RequestSpan::years(1)
        } else {
            RequestSpan::days(remaining.max(1) as i32)
        };
        return Continuation::Final(PlannedRequest {
            anchor: window.to,
            span,
        });
    }
    let gap = business_days(last, now);
    if gap > YEAR_HOP_THRESHOLD_DAYS {
        Continuation::Continue(PlannedRequest {
            anchor: jan_first(prev_anchor.year() + 1),
            span: RequestSpan::years(1),
        })
    } else {
        Continuation::Final(PlannedRequest {
            anchor: window.to,
            span: RequestSpan::days(gap.max(1) as i32),
        })
    }
}

/// January 1 of the given year.
fn jan_first(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).expect("valid year")
}
