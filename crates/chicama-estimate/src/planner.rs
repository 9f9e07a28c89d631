//! Fetch planning logic.

use std::time::Duration;

use chrono::NaiveDate;

use chicama_types::paginate::{self, Continuation, PlannedRequest};
use chicama_types::{BarSize, FetchWindow};

/// Regular-session minutes per trading day (09:30 through 15:59).
const SESSION_MINUTES_PER_DAY: u64 = 390;

/// Average CSV bytes per output row, header amortized away.
const CSV_BYTES_PER_ROW: u64 = 48;

/// Assumed provider pacing per bounded request.
const SECONDS_PER_REQUEST: u64 = 10;

/// Predicted shape of a fetch before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// The window the plan covers.
    pub window: FetchWindow,
    /// Bounded requests the session is expected to issue, in order.
    pub requests: Vec<PlannedRequest>,
    /// Business days inside the window.
    pub business_days: i64,
    /// Estimated rows in the output.
    pub estimated_rows: u64,
    /// Estimated CSV output size in bytes.
    pub estimated_csv_bytes: u64,
    /// Estimated wall-clock duration at assumed provider pacing.
    pub estimated_duration: Duration,
}

impl FetchPlan {
    /// Formats the plan as a human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Requests: {}\n\
             Rows: ~{}\n\
             Output: ~{} (CSV)\n\
             Duration: ~{}",
            self.requests.len(),
            format_rows(self.estimated_rows),
            format_bytes(self.estimated_csv_bytes),
            format_duration(self.estimated_duration),
        )
    }
}

/// Plans a fetch without issuing any request.
///
/// The request walk mirrors a live session, with the cursor assumed to
/// reach each request's anchor. `now` feeds the same year-hop decision
/// the session would make against the wall clock.
#[must_use]
pub fn plan(window: FetchWindow, bar_size: BarSize, now: NaiveDate) -> FetchPlan {
    let mut requests = Vec::new();
    let mut planned = paginate::initial_request(window);
    let mut keep_going = true;

    loop {
        requests.push(planned);
        match paginate::continuation(window, planned.anchor, now, planned.anchor, keep_going) {
            Continuation::Finished => break,
            Continuation::Final(next) => {
                keep_going = false;
                planned = next;
            }
            Continuation::Continue(next) => planned = next,
        }
    }

    let business_days = window.business_days();
    let rows_per_day = (SESSION_MINUTES_PER_DAY * 60 / bar_size.seconds()).max(1);
    let estimated_rows = business_days.max(0) as u64 * rows_per_day;
    let estimated_csv_bytes = estimated_rows * CSV_BYTES_PER_ROW;
    let estimated_duration = Duration::from_secs(requests.len() as u64 * SECONDS_PER_REQUEST);

    FetchPlan {
        window,
        requests,
        business_days,
        estimated_rows,
        estimated_csv_bytes,
        estimated_duration,
    }
}

/// Formats bytes in human-readable form (e.g., "1.5 GB", "250 MB").
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.2} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Formats duration in human-readable form (e.g., "2h 30m", "45m").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        if minutes > 0 {
            format!("{}h {}m", hours, minutes)
        } else {
            format!("{}h", hours)
        }
    } else if minutes > 0 {
        if seconds > 0 && minutes < 10 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        }
    } else {
        format!("{}s", seconds)
    }
}

/// Formats a row count in human-readable form.
fn format_rows(rows: u64) -> String {
    if rows >= 1_000_000_000 {
        format!("{:.2}B", rows as f64 / 1_000_000_000.0)
    } else if rows >= 1_000_000 {
        format!("{:.2}M", rows as f64 / 1_000_000.0)
    } else if rows >= 1_000 {
        format!("{:.2}K", rows as f64 / 1_000.0)
    } else {
        format!("{}", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chicama_types::{RequestSpan, SpanUnit};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn window(from: NaiveDate, to: NaiveDate) -> FetchWindow {
        FetchWindow::new(from, to).unwrap()
    }

    #[test]
    fn test_plan_small_window_single_request() {
        let w = window(date(2024, 10, 1), date(2024, 11, 1));
        let p = plan(w, BarSize::Min1, date(2024, 11, 5));

        assert_eq!(p.requests.len(), 1);
        assert_eq!(p.requests[0].span, RequestSpan::days(24));
        assert_eq!(p.business_days, 24);
        assert_eq!(p.estimated_rows, 24 * 390);
        assert_eq!(p.estimated_csv_bytes, 24 * 390 * 48);
        assert_eq!(p.estimated_duration, Duration::from_secs(10));
    }

    #[test]
    fn test_plan_long_window_walks_year_caps() {
        let w = window(date(2023, 1, 3), date(2025, 7, 1));
        let p = plan(w, BarSize::Min1, date(2025, 7, 3));

        assert_eq!(p.requests.len(), 3);
        assert_eq!(p.requests[0].anchor, date(2024, 1, 1));
        assert_eq!(p.requests[0].span, RequestSpan::years(1));
        assert_eq!(p.requests[1].anchor, date(2025, 1, 1));
        assert_eq!(p.requests[1].span, RequestSpan::years(1));
        assert_eq!(p.requests[2].anchor, date(2025, 7, 1));
        assert_eq!(p.requests[2].span.unit, SpanUnit::Day);
        // Wed 2025-01-01 through Thu 2025-07-03 is 132 business days.
        assert_eq!(p.requests[2].span, RequestSpan::days(132));
        assert_eq!(p.estimated_duration, Duration::from_secs(30));
    }

    #[test]
    fn test_plan_daily_bars_one_row_per_day() {
        let w = window(date(2024, 10, 1), date(2024, 11, 1));
        let p = plan(w, BarSize::Day1, date(2024, 11, 5));

        assert_eq!(p.estimated_rows, 24);
    }

    #[test]
    fn test_plan_hourly_bars() {
        let w = window(date(2024, 10, 1), date(2024, 11, 1));
        let p = plan(w, BarSize::Hour1, date(2024, 11, 5));

        // 390 session minutes truncate to 6 hourly rows per day.
        assert_eq!(p.estimated_rows, 24 * 6);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 B");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1_572_864), "1.50 MB");
        assert_eq!(format_bytes(1_610_612_736), "1.50 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
    }

    #[test]
    fn test_summary_mentions_requests() {
        let w = window(date(2024, 10, 1), date(2024, 11, 1));
        let p = plan(w, BarSize::Min1, date(2024, 11, 5));

        let summary = p.summary();
        assert!(summary.contains("Requests: 1"));
        assert!(summary.contains("9.36K"));
    }
}
