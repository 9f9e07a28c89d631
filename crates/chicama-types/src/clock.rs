//! Wall-clock abstraction.

use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for continuation decisions.
///
/// Sessions replaying captured batches pin the clock so the planner sees
/// the same wall-clock date the capture saw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    /// Real wall clock.
    #[default]
    System,
    /// Fixed instant, for replay and tests.
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns the current instant.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Self::System => Utc::now(),
            Self::Fixed(at) => *at,
        }
    }

    /// Returns the current date.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let at = Utc.with_ymd_and_hms(2024, 11, 5, 12, 0, 0).unwrap();
        let clock = Clock::Fixed(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 11, 5).unwrap());
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = Clock::System;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
