//! The forex trading calendar.
//!
//! FX trades a Sunday-through-Friday week in UTC. The default session spans
//! the whole day; Friday sessions close early at 20:00 (New York 4pm) and
//! Sunday sessions open late at 22:00 (New York 6pm). Saturday never trades.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use std::sync::Arc;

use crate::holidays::HolidaySchedule;

/// A predicate over dates and timestamps determining session membership.
pub trait TradingCalendar: Send + Sync {
    /// Calendar name as resolved by the provider.
    fn name(&self) -> &str;

    /// Whether the given date is a trading session at all.
    fn is_session_day(&self, date: NaiveDate) -> bool;

    /// Inclusive intraday open/close window for the given session date.
    ///
    /// Only meaningful when `is_session_day(date)` holds.
    fn session_window(&self, date: NaiveDate) -> (NaiveTime, NaiveTime);

    /// Whether a minute timestamp falls inside a session's trading window.
    fn is_session_minute(&self, ts: DateTime<Utc>) -> bool {
        let date = ts.date_naive();
        if !self.is_session_day(date) {
            return false;
        }
        let (open, close) = self.session_window(date);
        let t = ts.time();
        t >= open && t <= close
    }
}

/// Sunday-through-Friday FX calendar with holiday exclusion.
pub struct ForexCalendar {
    holidays: Arc<dyn HolidaySchedule>,
}

impl ForexCalendar {
    /// Friday early close, 20:00 UTC.
    pub fn friday_close() -> NaiveTime {
        hm(20, 0)
    }

    /// Sunday late open, 22:00 UTC.
    pub fn sunday_open() -> NaiveTime {
        hm(22, 0)
    }

    /// End of the default full-day session, 23:59 UTC.
    pub fn default_close() -> NaiveTime {
        hm(23, 59)
    }

    /// Create a calendar with the given holiday schedule.
    pub fn new(holidays: Arc<dyn HolidaySchedule>) -> Self {
        Self { holidays }
    }
}

impl TradingCalendar for ForexCalendar {
    fn name(&self) -> &str {
        "forex"
    }

    fn is_session_day(&self, date: NaiveDate) -> bool {
        date.weekday() != Weekday::Sat && !self.holidays.is_holiday(date)
    }

    fn session_window(&self, date: NaiveDate) -> (NaiveTime, NaiveTime) {
        match date.weekday() {
            Weekday::Sun => (Self::sunday_open(), Self::default_close()),
            Weekday::Fri => (NaiveTime::MIN, Self::friday_close()),
            _ => (NaiveTime::MIN, Self::default_close()),
        }
    }
}

/// Build a time of day from literal hour/minute components.
fn hm(hours: i64, minutes: i64) -> NaiveTime {
    NaiveTime::MIN + Duration::hours(hours) + Duration::minutes(minutes)
}
