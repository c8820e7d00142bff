//! Time source and calendar-day helpers.
//!
//! Every date rule in the engine works on local wall-clock calendar
//! dates, not elapsed time: two timestamps 20 hours apart that straddle
//! midnight fall on different days. The current time is injected through
//! the `Clock` trait so progression can be replayed deterministically.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

/// Trait for time sources.
///
/// Implementations return local wall-clock time without a zone attached.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use shadow_regimen::clock::{Clock, ManualClock};
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let mut clock = ManualClock::new(start);
/// clock.advance_days(1);
///
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
/// ```
pub trait Clock {
    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the operating system's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    now: NaiveDateTime,
}

impl ManualClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

/// Whether `a` and `b` fall on the same calendar day.
pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Whether `date` is the calendar day immediately before `today`.
pub fn is_previous_day(date: NaiveDate, today: NaiveDate) -> bool {
    days_between(date, today) == 1
}

/// Whole calendar days from `from` to `to`. Negative when `to` is earlier.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use shadow_regimen::clock::days_between;
///
/// let mar_1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let feb_28 = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
///
/// assert_eq!(days_between(feb_28, mar_1), 2); // leap year
/// assert_eq!(days_between(mar_1, feb_28), -2);
/// ```
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_same_day_crossing_midnight() {
        // 20 hours apart, different dates.
        let evening = at(2024, 5, 1, 23, 30);
        let next_evening = at(2024, 5, 2, 19, 30);
        assert!(!is_same_day(evening, next_evening));
        assert!(is_same_day(at(2024, 5, 1, 0, 1), evening));
    }

    #[test]
    fn test_previous_day() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let new_years_eve = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(is_previous_day(new_years_eve, today));
        assert!(!is_previous_day(today, today));
        assert!(!is_previous_day(today, new_years_eve));
    }

    #[test]
    fn test_days_between() {
        let a = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(a, a), 0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let mut clock = ManualClock::new(at(2024, 5, 1, 22, 0));
        clock.advance(Duration::hours(3));
        assert_eq!(clock.now(), at(2024, 5, 2, 1, 0));
        clock.set(at(2020, 1, 1, 0, 0));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    }
}
