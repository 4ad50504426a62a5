//! Reporting windows.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a reporting window is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// Start date is after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Shifting the window left the representable calendar.
    #[error("Date out of range while shifting {0}")]
    OutOfRange(NaiveDate),
}

/// Inclusive date window used to select line items.
///
/// `start: None` means "from the beginning of the book".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included, if bounded.
    pub start: Option<NaiveDate>,
    /// Last day included.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a bounded window.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidDateRange` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if start > end {
            return Err(PeriodError::InvalidDateRange { start, end });
        }
        Ok(Self {
            start: Some(start),
            end,
        })
    }

    /// Creates a window open at the start.
    #[must_use]
    pub const fn until(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| start <= date) && date <= self.end
    }
}

/// A reporting period with its comparative (prior-year) counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period (inclusive).
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::InvalidDateRange` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        DateRange::new(start, end)?;
        Ok(Self { start, end })
    }

    /// Window of the period itself.
    #[must_use]
    pub const fn current(&self) -> DateRange {
        DateRange {
            start: Some(self.start),
            end: self.end,
        }
    }

    /// Same window one year earlier.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::OutOfRange` if the shift underflows the calendar.
    pub fn previous(&self) -> Result<DateRange, PeriodError> {
        let year = Months::new(12);
        let start = self
            .start
            .checked_sub_months(year)
            .ok_or(PeriodError::OutOfRange(self.start))?;
        let end = self
            .end
            .checked_sub_months(year)
            .ok_or(PeriodError::OutOfRange(self.end))?;
        DateRange::new(start, end)
    }

    /// Window of the current or the comparative period.
    ///
    /// # Errors
    ///
    /// See [`previous`](Self::previous).
    pub fn window(&self, cur_period: bool) -> Result<DateRange, PeriodError> {
        if cur_period {
            Ok(self.current())
        } else {
            self.previous()
        }
    }

    /// Window carrying balances into the period: from `opening` (or the
    /// beginning of the book) up to the day before `start`.
    ///
    /// Returns `None` when `opening` is on or after `start`, i.e. there is no
    /// history before the period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodError::OutOfRange` if `start` is the first representable day.
    pub fn beginning_window(
        &self,
        opening: Option<NaiveDate>,
    ) -> Result<Option<DateRange>, PeriodError> {
        let day_before = self
            .start
            .checked_sub_days(Days::new(1))
            .ok_or(PeriodError::OutOfRange(self.start))?;
        match opening {
            Some(opening) if opening >= self.start => Ok(None),
            Some(opening) => DateRange::new(opening, day_before).map(Some),
            None => Ok(Some(DateRange::until(day_before))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = ReportPeriod::new(d(2024, 5, 1), d(2024, 4, 1)).unwrap_err();
        assert!(matches!(err, PeriodError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_previous_is_prior_year() {
        let period = ReportPeriod::new(d(2024, 1, 1), d(2024, 3, 31)).unwrap();
        let previous = period.previous().unwrap();
        assert_eq!(previous.start, Some(d(2023, 1, 1)));
        assert_eq!(previous.end, d(2023, 3, 31));
    }

    #[test]
    fn test_previous_clamps_leap_day() {
        let period = ReportPeriod::new(d(2024, 2, 1), d(2024, 2, 29)).unwrap();
        assert_eq!(period.previous().unwrap().end, d(2023, 2, 28));
    }

    #[test]
    fn test_window_selects_period() {
        let period = ReportPeriod::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        assert_eq!(period.window(true).unwrap(), period.current());
        assert_eq!(period.window(false).unwrap(), period.previous().unwrap());
    }

    #[test]
    fn test_beginning_window() {
        let period = ReportPeriod::new(d(2024, 4, 1), d(2024, 6, 30)).unwrap();

        let open = period.beginning_window(None).unwrap().unwrap();
        assert_eq!(open.start, None);
        assert_eq!(open.end, d(2024, 3, 31));

        let bounded = period.beginning_window(Some(d(2024, 1, 1))).unwrap().unwrap();
        assert_eq!(bounded.start, Some(d(2024, 1, 1)));

        assert!(period.beginning_window(Some(d(2024, 4, 1))).unwrap().is_none());
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
        assert!(DateRange::until(d(2024, 1, 31)).contains(d(1999, 1, 1)));
    }
}
