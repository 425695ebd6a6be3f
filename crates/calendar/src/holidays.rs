//! Holiday schedule collaborator.
//!
//! Holiday sets are supplied from outside the calendar: a schedule is a list
//! of ad-hoc closure dates plus a recurring-rule predicate. A holiday removes
//! the entire day regardless of weekday.

use chrono::{Datelike, NaiveDate};

/// A supplier of market holidays.
pub trait HolidaySchedule: Send + Sync {
    /// One-off closure dates, sorted ascending.
    fn adhoc_holidays(&self) -> &[NaiveDate];

    /// Recurring holiday rule (e.g. New Year's Day every year).
    fn is_regular_holiday(&self, date: NaiveDate) -> bool;

    /// Whether the given date is a holiday under either rule.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.is_regular_holiday(date) || self.adhoc_holidays().binary_search(&date).is_ok()
    }
}

/// Schedule with no holidays at all; useful in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidaySchedule for NoHolidays {
    fn adhoc_holidays(&self) -> &[NaiveDate] {
        &[]
    }

    fn is_regular_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// Holiday schedule for FX markets.
///
/// FX trades around most national holidays; the recurring closures are
/// New Year's Day and Christmas Day. Ad-hoc dates cover anything else.
#[derive(Debug, Clone, Default)]
pub struct FxHolidays {
    adhoc: Vec<NaiveDate>,
}

impl FxHolidays {
    /// Schedule with only the recurring closures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule with additional one-off closure dates.
    pub fn with_adhoc(mut adhoc: Vec<NaiveDate>) -> Self {
        adhoc.sort();
        adhoc.dedup();
        Self { adhoc }
    }
}

impl HolidaySchedule for FxHolidays {
    fn adhoc_holidays(&self) -> &[NaiveDate] {
        &self.adhoc
    }

    fn is_regular_holiday(&self, date: NaiveDate) -> bool {
        matches!((date.month(), date.day()), (1, 1) | (12, 25))
    }
}
