//! Benchmark utilities for chicama.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use chicama_types::RawBar;

/// Generates `days` trading days of 1-minute session bars.
///
/// Bar timestamps use the provider's session clock (06:30 through
/// 12:59), so each day normalizes to a full 09:30 through 15:59
/// exchange session of 390 bars. Weekends are skipped.
#[must_use]
pub fn session_raw_bars(start: NaiveDate, days: usize) -> Vec<RawBar> {
    generate(start, days, 6, 30, 390)
}

/// Generates `days` trading days of 1-minute volatility-index bars.
///
/// Days open at 02:15 on the provider clock, so roughly half of each
/// day falls outside the regular session after normalization.
#[must_use]
pub fn vix_raw_bars(start: NaiveDate, days: usize) -> Vec<RawBar> {
    generate(start, days, 2, 15, 765)
}

fn generate(
    start: NaiveDate,
    days: usize,
    open_hour: u32,
    open_minute: u32,
    minutes: u32,
) -> Vec<RawBar> {
    let mut bars = Vec::with_capacity(days * minutes as usize);
    let mut day = start;
    let mut generated = 0;
    let mut price = 500.0;

    while generated < days {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            for minute in 0..minutes {
                let hour = open_hour + (open_minute + minute) / 60;
                let min = (open_minute + minute) % 60;
                let time = format!("{} {:02}:{:02}:00", day.format("%Y%m%d"), hour, min);
                // Deterministic drift keeps prices varied without a RNG
                price += f64::from(minute % 7) * 0.01 - 0.03;
                bars.push(RawBar::new(
                    time,
                    price,
                    price + 0.25,
                    price - 0.25,
                    price + 0.05,
                    1000 + i64::from(minute),
                ));
            }
            generated += 1;
        }
        day += Duration::days(1);
    }

    bars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_bars_per_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = session_raw_bars(start, 2);
        assert_eq!(bars.len(), 2 * 390);
        assert_eq!(bars[0].time, "20240102 06:30:00");
        assert_eq!(bars[389].time, "20240102 12:59:00");
        assert_eq!(bars[390].time, "20240103 06:30:00");
    }

    #[test]
    fn test_weekends_skipped() {
        // Fri 2024-01-05; the next trading day is Mon 2024-01-08.
        let start = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let bars = session_raw_bars(start, 2);
        assert_eq!(bars[390].time, "20240108 06:30:00");
    }

    #[test]
    fn test_vix_day_shape() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = vix_raw_bars(start, 1);
        assert_eq!(bars.len(), 765);
        assert_eq!(bars[0].time, "20240102 02:15:00");
        assert_eq!(bars[764].time, "20240102 14:59:00");
    }
}
