//! Calendar month arithmetic
//!
//! All tenure rules in the club are expressed in whole calendar months.
//! A month is "complete" when adding it to the start date does not overshoot
//! the end date; additions clamp to the last day of shorter months
//! (Jan 31 + 1 month = Feb 28/29).

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Add `months` calendar months to `date`, clamping to the end of the month
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Whole calendar months elapsed from `start` to `end` (truncating)
///
/// Returns 0 when `end` is before `start`.
#[must_use]
pub fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let raw = (end.year() - start.year()) * 12 + end.month0() as i32 - start.month0() as i32;
    let mut months = raw.max(0) as u32;

    // The naive month difference overshoots when the day-of-month has not come round yet
    while months > 0 && add_months(start, months) > end {
        months -= 1;
    }

    months
}

/// A calendar month (year + month), used for "once per month" rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Calendar month containing `date`
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Check whether `date` falls inside this month
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_between_truncates() {
        assert_eq!(months_between(date(2024, 1, 15), date(2024, 5, 15)), 4);
        assert_eq!(months_between(date(2024, 1, 15), date(2024, 5, 14)), 3);
        assert_eq!(months_between(date(2024, 1, 15), date(2024, 1, 31)), 0);
    }

    #[test]
    fn test_months_between_across_years() {
        assert_eq!(months_between(date(2023, 11, 1), date(2024, 2, 1)), 3);
        assert_eq!(months_between(date(2022, 6, 10), date(2024, 6, 9)), 23);
    }

    #[test]
    fn test_months_between_end_of_month() {
        // Jan 31 + 1 month clamps to Feb 29 in a leap year
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 29)), 1);
        assert_eq!(months_between(date(2024, 1, 31), date(2024, 2, 28)), 0);
    }

    #[test]
    fn test_months_between_reversed_is_zero() {
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 1, 1)), 0);
        assert_eq!(months_between(date(2024, 5, 1), date(2024, 5, 1)), 0);
    }

    #[test]
    fn test_add_months_clamps() {
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 10, 15), 6), date(2025, 4, 15));
    }

    #[test]
    fn test_year_month() {
        let ym = YearMonth::of(date(2024, 3, 17));
        assert!(ym.contains(date(2024, 3, 1)));
        assert!(!ym.contains(date(2024, 4, 1)));
        assert!(!ym.contains(date(2023, 3, 17)));
        assert_eq!(ym.to_string(), "2024-03");
    }
}
