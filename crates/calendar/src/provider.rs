//! Calendar lookup by name.
//!
//! The orchestrator receives a `CalendarProvider` capability instead of
//! consulting a global registry, so tests and embedders can substitute
//! their own calendars.

use fxbundle_core::{Error, Result};
use std::sync::Arc;

use crate::forex::{ForexCalendar, TradingCalendar};
use crate::holidays::{FxHolidays, HolidaySchedule};

/// Resolves calendar names to calendar instances.
pub trait CalendarProvider: Send + Sync {
    fn get_calendar(&self, name: &str) -> Result<Arc<dyn TradingCalendar>>;
}

/// Provider for the calendars shipped with this crate.
pub struct BuiltinCalendars {
    holidays: Arc<dyn HolidaySchedule>,
}

impl BuiltinCalendars {
    /// Provider with the stock FX holiday schedule.
    pub fn new() -> Self {
        Self {
            holidays: Arc::new(FxHolidays::new()),
        }
    }

    /// Provider with a caller-supplied holiday schedule.
    pub fn with_holidays(holidays: Arc<dyn HolidaySchedule>) -> Self {
        Self { holidays }
    }
}

impl Default for BuiltinCalendars {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarProvider for BuiltinCalendars {
    fn get_calendar(&self, name: &str) -> Result<Arc<dyn TradingCalendar>> {
        match name {
            "forex" => Ok(Arc::new(ForexCalendar::new(self.holidays.clone()))),
            other => Err(Error::config(format!("unknown calendar '{other}'"))),
        }
    }
}
