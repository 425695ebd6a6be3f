//! Trading calendars for the fxbundle ingestion pipeline.
//!
//! This crate handles:
//! - Session-day membership (which dates trade at all)
//! - Intraday session windows (special opens and closes)
//! - Holiday exclusion via an injected schedule collaborator
//! - Calendar lookup by name through the `CalendarProvider` capability

pub mod forex;
pub mod holidays;
pub mod provider;

pub use forex::{ForexCalendar, TradingCalendar};
pub use holidays::{FxHolidays, HolidaySchedule, NoHolidays};
pub use provider::{BuiltinCalendars, CalendarProvider};
