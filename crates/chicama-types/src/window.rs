//! Fetch window definition.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WindowError;
use crate::paginate;

/// The date range `[from, to)` a fetch session should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchWindow {
    /// Start date, inclusive.
    pub from: NaiveDate,
    /// End date, exclusive.
    pub to: NaiveDate,
}

impl FetchWindow {
    /// Creates a new window.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is not strictly before `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, WindowError> {
        if from >= to {
            return Err(WindowError::Empty { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns the number of weekdays the window covers.
    #[must_use]
    pub fn business_days(&self) -> i64 {
        paginate::business_days(self.from, self.to)
    }

    /// Returns true if the window contains the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date < self.to
    }
}

impl fmt::Display for FetchWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_window() {
        let window = FetchWindow::new(date(2024, 10, 1), date(2024, 11, 1)).unwrap();
        assert_eq!(window.from, date(2024, 10, 1));
        assert_eq!(window.to, date(2024, 11, 1));
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(FetchWindow::new(date(2024, 10, 1), date(2024, 10, 1)).is_err());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = FetchWindow::new(date(2024, 11, 1), date(2024, 10, 1)).unwrap_err();
        assert!(matches!(err, WindowError::Empty { .. }));
    }

    #[test]
    fn test_contains() {
        let window = FetchWindow::new(date(2024, 10, 1), date(2024, 11, 1)).unwrap();
        assert!(window.contains(date(2024, 10, 1)));
        assert!(window.contains(date(2024, 10, 15)));
        assert!(!window.contains(date(2024, 11, 1)));
        assert!(!window.contains(date(2024, 9, 30)));
    }

    #[test]
    fn test_display() {
        let window = FetchWindow::new(date(2024, 10, 1), date(2024, 11, 1)).unwrap();
        assert_eq!(window.to_string(), "2024-10-01 to 2024-11-01");
    }
}
